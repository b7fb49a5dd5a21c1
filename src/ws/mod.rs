//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams vault events to subscribers and
//! answers read-only commands about pools and the pause lifecycle.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
