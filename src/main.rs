//! hydra-vault server entry point.
//!
//! Builds the vault from configuration and starts the Axum HTTP server
//! with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use hydra_vault::api;
use hydra_vault::app_state::AppState;
use hydra_vault::config::{GatewayConfig, LogFormat};
use hydra_vault::domain::{Authorizer, BasicAuthorizer, Clock, EventBus, SystemClock, Vault};
use hydra_vault::persistence::{PostgresEventLog, spawn_event_recorder};
use hydra_vault::service::VaultService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("invalid configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(
        addr = %config.listen_addr,
        vault = %config.vault_address,
        "starting hydra-vault"
    );

    // Build domain layer
    let authorizer = BasicAuthorizer::new();
    if let Some(admin) = config.admin_address {
        authorizer.grant_all(admin);
        tracing::info!(%admin, "granted all actions to admin");
    }
    let authorizer: Arc<dyn Authorizer> = Arc::new(authorizer);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let event_bus = EventBus::new(config.event_bus_capacity);
    let vault = Vault::with_parts(authorizer, clock, event_bus, config.vault_settings())
        .context("invalid vault settings")?;

    // Build service layer
    let vault_service = Arc::new(VaultService::new(Arc::new(vault)));

    // Optional event log
    let event_log = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .context("failed to connect to PostgreSQL")?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;
        let log = PostgresEventLog::new(pool);
        let _recorder = spawn_event_recorder(vault_service.event_bus(), log.clone());
        tracing::info!("event log enabled");
        Some(log)
    } else {
        None
    };

    // Build application
    let app = api::build_app(
        AppState::new(vault_service, event_log),
        config.request_timeout,
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
