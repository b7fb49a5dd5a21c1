//! Database models for the event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored event row from the `vault_events` table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoredEvent {
    /// Auto-increment row ID.
    pub id: i64,
    /// Pool the event concerns; `None` for vault-wide events.
    pub pool: Option<String>,
    /// Event type discriminator (e.g. `"pool_registered"`).
    pub event_type: String,
    /// JSONB payload with the full serialized event.
    #[schema(value_type = Object)]
    pub payload: serde_json::Value,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}
