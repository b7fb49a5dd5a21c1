//! Vault service: serialises mutating calls and adapts results for the API.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::{
    Address, EventBus, PauseStatus, PoolEntry, PoolSummary, TokenDescriptor, Vault,
};
use crate::error::GatewayError;

/// Input of a pool registration.
#[derive(Debug, Clone)]
pub struct PoolRegistration {
    /// Pool address.
    pub pool: Address,
    /// Pool name.
    pub name: String,
    /// Pool symbol.
    pub symbol: String,
    /// Factory that deployed the pool.
    pub factory: Address,
    /// Tokens in canonical order.
    pub tokens: Vec<TokenDescriptor>,
}

/// Pause lifecycle as seen at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct PauseSnapshot {
    /// Derived status.
    pub status: PauseStatus,
    /// Instant the status was derived for.
    pub at: DateTime<Utc>,
    /// Whether value-moving operations are allowed at `at`.
    pub operations_allowed: bool,
    /// Whether the manual pause flag is set.
    pub manually_paused: bool,
    /// End of the pause window.
    pub pause_window_end: DateTime<Utc>,
    /// End of the buffer period.
    pub buffer_period_end: DateTime<Utc>,
}

/// Orchestration layer in front of the [`Vault`].
///
/// The vault rejects overlapping mutating calls instead of queueing them;
/// this service is the hosting layer that queues them. Every mutation
/// follows the pattern: acquire the write mutex → call the vault → return.
/// The vault itself logs and publishes events.
#[derive(Debug)]
pub struct VaultService {
    vault: Arc<Vault>,
    write_lock: Mutex<()>,
}

impl VaultService {
    /// Creates a new `VaultService`.
    #[must_use]
    pub fn new(vault: Arc<Vault>) -> Self {
        Self {
            vault,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns a reference to the inner [`Vault`].
    #[must_use]
    pub fn vault(&self) -> &Arc<Vault> {
        &self.vault
    }

    /// Returns the event bus the vault publishes to.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        self.vault.event_bus()
    }

    /// Registers a pool on behalf of `caller` and returns its entry.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Vault`] carrying the first failing check.
    pub async fn register_pool(
        &self,
        caller: Address,
        registration: PoolRegistration,
    ) -> Result<PoolEntry, GatewayError> {
        let _serial = self.write_lock.lock().await;
        let PoolRegistration {
            pool,
            name,
            symbol,
            factory,
            tokens,
        } = registration;

        self.vault
            .register_pool(caller, pool, &name, &symbol, factory, tokens)?;
        Ok(self.vault.pool(pool)?)
    }

    /// Pauses the vault on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Vault`] if the window has expired or the
    /// caller is not authorized.
    pub async fn pause(&self, caller: Address) -> Result<PauseSnapshot, GatewayError> {
        let _serial = self.write_lock.lock().await;
        self.vault.pause(caller)?;
        Ok(self.pause_snapshot(None))
    }

    /// Unpauses the vault on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Vault`] if the window has expired or the
    /// caller is not authorized.
    pub async fn unpause(&self, caller: Address) -> Result<PauseSnapshot, GatewayError> {
        let _serial = self.write_lock.lock().await;
        self.vault.unpause(caller)?;
        Ok(self.pause_snapshot(None))
    }

    /// Returns the pause lifecycle at `at`, or now if `None`.
    #[must_use]
    pub fn pause_snapshot(&self, at: Option<DateTime<Utc>>) -> PauseSnapshot {
        let at = at.unwrap_or_else(|| self.vault.now());
        let state = self.vault.pause_state();
        PauseSnapshot {
            status: state.status_at(at),
            at,
            operations_allowed: state.is_operation_allowed(at),
            manually_paused: state.is_manually_paused(),
            pause_window_end: state.pause_window_end(),
            buffer_period_end: state.buffer_period_end(),
        }
    }

    /// Returns `true` if the pool has been registered.
    #[must_use]
    pub fn is_registered(&self, pool: Address) -> bool {
        self.vault.is_registered(pool)
    }

    /// Returns the registry entry of a pool.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Vault`] if the pool is not registered.
    pub fn pool(&self, pool: Address) -> Result<PoolEntry, GatewayError> {
        Ok(self.vault.pool(pool)?)
    }

    /// Returns the pool's tokens in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Vault`] if the pool is not registered.
    pub fn tokens_of(&self, pool: Address) -> Result<Vec<TokenDescriptor>, GatewayError> {
        Ok(self.vault.tokens_of(pool)?)
    }

    /// Returns the 18-decimal scaling factor of each token.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Vault`] if the pool is not registered or a
    /// token has more than 18 decimals.
    pub fn scaling_factors(&self, pool: Address) -> Result<Vec<u128>, GatewayError> {
        Ok(self.vault.scaling_factors(pool)?)
    }

    /// Returns summaries of all registered pools in registration order.
    #[must_use]
    pub fn list_pools(&self) -> Vec<PoolSummary> {
        self.vault.pools()
    }
}
