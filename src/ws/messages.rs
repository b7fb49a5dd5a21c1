//! WebSocket message types: envelope, commands, and events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level WebSocket message envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsMessage {
    /// Client-provided ID for requests; server-generated for events.
    pub id: String,
    /// Message type discriminator.
    #[serde(rename = "type")]
    pub msg_type: WsMessageType,
    /// ISO-8601 timestamp.
    pub timestamp: DateTime<Utc>,
    /// Variant-specific payload.
    pub payload: serde_json::Value,
}

impl WsMessage {
    /// Builds a server-originated message stamped with the current time.
    #[must_use]
    pub fn new(id: String, msg_type: WsMessageType, payload: serde_json::Value) -> Self {
        Self {
            id,
            msg_type,
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Builds an error message with a numeric code.
    #[must_use]
    pub fn error(id: String, code: u32, message: &str) -> Self {
        Self::new(
            id,
            WsMessageType::Error,
            serde_json::json!({ "code": code, "message": message }),
        )
    }
}

/// Discriminator for WebSocket message types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WsMessageType {
    /// Client → Server command.
    Command,
    /// Server → Client response to a command.
    Response,
    /// Server → Client broadcast event.
    Event,
    /// Server → Client error.
    Error,
}

/// Commands that a client can send over WebSocket, carried in the
/// envelope's `payload`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WsCommand {
    /// Subscribe to events for specific pools.
    Subscribe {
        /// Pool addresses to subscribe to. Use `["*"]` for all pools.
        pool_ids: Vec<String>,
    },
    /// Unsubscribe from events for specific pools.
    Unsubscribe {
        /// Pool addresses to unsubscribe from.
        pool_ids: Vec<String>,
    },
    /// Get the current pause lifecycle.
    GetStatus,
    /// Get a registered pool.
    GetPool {
        /// Pool address.
        pool: String,
    },
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn envelope_uses_type_key() {
        let msg = WsMessage::new("1".to_string(), WsMessageType::Response, serde_json::json!({}));
        let Ok(value) = serde_json::to_value(&msg) else {
            panic!("serialize failed");
        };
        assert_eq!(value["type"], "response");
        assert_eq!(value["id"], "1");
    }

    #[test]
    fn subscribe_command_parses_from_payload() {
        let payload = serde_json::json!({ "command": "subscribe", "pool_ids": ["*"] });
        let Ok(cmd) = serde_json::from_value::<WsCommand>(payload) else {
            panic!("parse failed");
        };
        assert_eq!(
            cmd,
            WsCommand::Subscribe {
                pool_ids: vec!["*".to_string()]
            }
        );
    }

    #[test]
    fn get_status_has_no_fields() {
        let payload = serde_json::json!({ "command": "get_status" });
        assert!(matches!(
            serde_json::from_value::<WsCommand>(payload),
            Ok(WsCommand::GetStatus)
        ));
    }
}
