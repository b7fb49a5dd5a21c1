//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::persistence::PostgresEventLog;
use crate::service::VaultService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Vault service for all business logic.
    pub vault_service: Arc<VaultService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
    /// Event log, present when persistence is enabled.
    pub event_log: Option<PostgresEventLog>,
}

impl AppState {
    /// Builds state around a service, sharing the vault's event bus.
    #[must_use]
    pub fn new(vault_service: Arc<VaultService>, event_log: Option<PostgresEventLog>) -> Self {
        let event_bus = vault_service.event_bus().clone();
        Self {
            vault_service,
            event_bus,
            event_log,
        }
    }
}
