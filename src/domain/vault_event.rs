//! Domain events reflecting vault state mutations.
//!
//! Every successful mutating vault call emits exactly one [`VaultEvent`]
//! through the [`super::EventBus`]. Failed calls emit nothing. Events are
//! broadcast to WebSocket subscribers and optionally persisted to the
//! PostgreSQL event log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Address, TokenDescriptor};

/// Domain event emitted after every successful state mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum VaultEvent {
    /// Emitted when a pool is registered.
    PoolRegistered {
        /// Pool address.
        pool: Address,
        /// Factory that deployed the pool.
        factory: Address,
        /// Tokens in canonical order.
        tokens: Vec<TokenDescriptor>,
        /// Registration timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a pause or unpause call.
    PausedStateChanged {
        /// New value of the manual pause flag.
        paused: bool,
        /// Timestamp of the change.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when the vault's authorizer is replaced.
    AuthorizerChanged {
        /// Timestamp of the change.
        timestamp: DateTime<Utc>,
    },
}

impl VaultEvent {
    /// Returns the pool this event concerns, or `None` for vault-wide events.
    #[must_use]
    pub const fn pool(&self) -> Option<Address> {
        match self {
            Self::PoolRegistered { pool, .. } => Some(*pool),
            Self::PausedStateChanged { .. } | Self::AuthorizerChanged { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::PoolRegistered { .. } => "pool_registered",
            Self::PausedStateChanged { .. } => "paused_state_changed",
            Self::AuthorizerChanged { .. } => "authorizer_changed",
        }
    }

    /// Returns the time the event was emitted.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::PoolRegistered { timestamp, .. }
            | Self::PausedStateChanged { timestamp, .. }
            | Self::AuthorizerChanged { timestamp } => *timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_registered_carries_pool() {
        let pool = Address::repeat_byte(1);
        let event = VaultEvent::PoolRegistered {
            pool,
            factory: Address::repeat_byte(2),
            tokens: vec![TokenDescriptor::new(Address::repeat_byte(3), 18)],
            timestamp: Utc::now(),
        };
        assert_eq!(event.event_type_str(), "pool_registered");
        assert_eq!(event.pool(), Some(pool));
    }

    #[test]
    fn paused_state_changed_is_vault_wide() {
        let event = VaultEvent::PausedStateChanged {
            paused: true,
            timestamp: Utc::now(),
        };
        assert_eq!(event.pool(), None);

        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"event_type\":\"paused_state_changed\""));
        assert!(json.contains("\"paused\":true"));
    }

    #[test]
    fn tokens_serialize_in_order() {
        let event = VaultEvent::PoolRegistered {
            pool: Address::repeat_byte(1),
            factory: Address::repeat_byte(2),
            tokens: vec![
                TokenDescriptor::new(Address::repeat_byte(0xbb), 6),
                TokenDescriptor::new(Address::repeat_byte(0xaa), 18),
            ],
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        let bb = json.find("0xbbbb").unwrap_or(usize::MAX);
        let aa = json.find("0xaaaa").unwrap_or(0);
        assert!(bb < aa);
    }
}
