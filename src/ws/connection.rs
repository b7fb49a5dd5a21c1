//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::api::dto::{PauseStatusResponse, PoolDetailResponse};
use crate::domain::{Address, VaultEvent};
use crate::error::GatewayError;
use crate::service::VaultService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<VaultEvent>,
    vault_service: Arc<VaultService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs, &vault_service);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Event from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(vault_event) => {
                        if subs.matches(vault_event.pool()) {
                            let msg = WsMessage::new(
                                uuid::Uuid::new_v4().to_string(),
                                WsMessageType::Event,
                                serde_json::to_value(&vault_event).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    vault_service: &VaultService,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON")).ok();
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return serde_json::to_string(&WsMessage::error(msg.id, 404, "unknown command")).ok();
    };

    let response = match command {
        WsCommand::Subscribe { pool_ids } => {
            let wildcard = pool_ids.iter().any(|s| s == "*");
            let pools = parse_pools(&pool_ids);
            subs.subscribe(&pools, wildcard);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": pools.iter().map(Address::to_string).collect::<Vec<_>>(),
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Unsubscribe { pool_ids } => {
            let pools = parse_pools(&pool_ids);
            subs.unsubscribe(&pools);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": pools.iter().map(Address::to_string).collect::<Vec<_>>(),
                    "remaining_count": subs.count(),
                }),
            )
        }
        WsCommand::GetStatus => {
            let vault = vault_service.vault().address().to_string();
            let status = PauseStatusResponse::new(vault, vault_service.pause_snapshot(None));
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::to_value(&status).unwrap_or_default(),
            )
        }
        WsCommand::GetPool { pool } => {
            let result = pool
                .parse::<Address>()
                .map_err(|e| GatewayError::InvalidRequest(format!("pool: {e}")))
                .and_then(|pool| vault_service.pool(pool));
            match result {
                Ok(entry) => WsMessage::new(
                    msg.id,
                    WsMessageType::Response,
                    serde_json::to_value(PoolDetailResponse::from(&entry)).unwrap_or_default(),
                ),
                Err(e) => WsMessage::error(msg.id, e.error_code(), &e.to_string()),
            }
        }
    };

    serde_json::to_string(&response).ok()
}

/// Parses subscription targets, skipping the wildcard and malformed entries.
fn parse_pools(pool_ids: &[String]) -> Vec<Address> {
    pool_ids
        .iter()
        .filter(|s| s.as_str() != "*")
        .filter_map(|s| s.parse::<Address>().ok())
        .collect()
}
