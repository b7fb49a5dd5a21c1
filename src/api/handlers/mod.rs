//! REST endpoint handlers organized by resource.

pub mod events;
pub mod pool;
pub mod system;
pub mod vault;

use axum::Router;

use crate::app_state::AppState;
use crate::domain::Address;
use crate::error::GatewayError;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(pool::routes())
        .merge(vault::routes())
        .merge(events::routes())
}

/// Parses a hex address from a request field.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] naming the field on failure.
pub(crate) fn parse_address(field: &str, value: &str) -> Result<Address, GatewayError> {
    value
        .parse::<Address>()
        .map_err(|e| GatewayError::InvalidRequest(format!("{field}: {e}")))
}
