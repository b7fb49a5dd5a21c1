//! PostgreSQL implementation of the event log.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::models::StoredEvent;
use crate::domain::{Address, EventBus, VaultEvent};
use crate::error::GatewayError;

type EventRow = (i64, Option<String>, String, serde_json::Value, DateTime<Utc>);

const SELECT_AFTER_ID: &str = "SELECT id, pool, event_type, payload, created_at FROM vault_events \
     WHERE id > $1 ORDER BY id ASC LIMIT $2";

const SELECT_POOL_AFTER_ID: &str = "SELECT id, pool, event_type, payload, created_at FROM vault_events \
     WHERE id > $1 AND pool = $3 ORDER BY id ASC LIMIT $2";

/// PostgreSQL-backed event log using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresEventLog {
    pool: PgPool,
}

impl PostgresEventLog {
    /// Creates a new event log with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends an event to the log.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on serialization or
    /// database failure.
    pub async fn save_event(&self, event: &VaultEvent) -> Result<i64, GatewayError> {
        let payload = serde_json::to_value(event)
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        let row = sqlx::query_scalar::<_, i64>(
            "INSERT INTO vault_events (pool, event_type, payload, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(event.pool().map(|p| p.to_string()))
        .bind(event.event_type_str())
        .bind(&payload)
        .bind(event.timestamp())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(row)
    }

    /// Loads up to `limit` events with an id greater than `after_id`, in
    /// insertion order, optionally filtered by pool.
    ///
    /// Passing the last returned id back as `after_id` resumes exactly where
    /// the previous page ended, even when several events share a timestamp.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on database failure.
    pub async fn load_events_after(
        &self,
        after_id: i64,
        pool: Option<Address>,
        limit: i64,
    ) -> Result<Vec<StoredEvent>, GatewayError> {
        let query = match pool {
            Some(pool) => sqlx::query_as::<_, EventRow>(SELECT_POOL_AFTER_ID)
                .bind(after_id)
                .bind(limit)
                .bind(pool.to_string()),
            None => sqlx::query_as::<_, EventRow>(SELECT_AFTER_ID)
                .bind(after_id)
                .bind(limit),
        };
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, pool, event_type, payload, created_at)| StoredEvent {
                    id,
                    pool,
                    event_type,
                    payload,
                    created_at,
                },
            )
            .collect())
    }
}

/// Spawns a task that appends every event published on `bus` to `log`.
///
/// Write failures are logged and skipped; the task ends when the bus is
/// dropped.
#[must_use]
pub fn spawn_event_recorder(bus: &EventBus, log: PostgresEventLog) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Err(e) = log.save_event(&event).await {
                        tracing::error!(
                            event_type = event.event_type_str(),
                            error = %e,
                            "failed to record vault event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(lagged = n, "event recorder lagged behind event bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!("event recorder stopped");
    })
}
