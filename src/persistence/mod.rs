//! Persistence layer: PostgreSQL event log.
//!
//! Every [`crate::domain::VaultEvent`] published on the event bus can be
//! appended to the `vault_events` table by a background recorder and read
//! back later. The concrete implementation uses `sqlx::PgPool` for async
//! PostgreSQL access.

pub mod models;
pub mod postgres;

pub use models::StoredEvent;
pub use postgres::{PostgresEventLog, spawn_event_recorder};
