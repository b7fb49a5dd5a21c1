//! Vault lifecycle handlers: pause, unpause, status.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::auth::SignedRequest;
use crate::api::dto::{PauseStatusResponse, StatusQuery};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /vault/pause`: Set the manual pause flag.
///
/// # Errors
///
/// Returns [`GatewayError`] if the signature does not verify, the pause
/// window has expired, or the caller is not authorized.
#[utoipa::path(
    post,
    path = "/api/v1/vault/pause",
    tag = "Vault",
    summary = "Pause the vault",
    description = "Pauses the vault. Only possible before the pause window ends.",
    params(
        ("x-vault-public-key" = String, Header, description = "Hex Ed25519 public key of the caller"),
        ("x-vault-timestamp" = i64, Header, description = "Unix seconds at signing time"),
        ("x-vault-signature" = String, Header, description = "Hex Ed25519 signature over method, path, timestamp and body"),
    ),
    responses(
        (status = 200, description = "Vault paused", body = PauseStatusResponse),
        (status = 401, description = "Missing or invalid request signature", body = ErrorResponse),
        (status = 403, description = "Caller not authorized", body = ErrorResponse),
        (status = 409, description = "Pause window expired", body = ErrorResponse),
    )
)]
pub async fn pause(
    State(state): State<AppState>,
    SignedRequest { caller, .. }: SignedRequest,
) -> Result<impl IntoResponse, GatewayError> {
    let snapshot = state.vault_service.pause(caller).await?;
    let vault = state.vault_service.vault().address().to_string();
    Ok(Json(PauseStatusResponse::new(vault, snapshot)))
}

/// `POST /vault/unpause`: Clear the manual pause flag.
///
/// # Errors
///
/// Returns [`GatewayError`] if the signature does not verify, the pause
/// window has expired, or the caller is not authorized.
#[utoipa::path(
    post,
    path = "/api/v1/vault/unpause",
    tag = "Vault",
    summary = "Unpause the vault",
    description = "Unpauses the vault. Only possible before the pause window ends; afterwards the vault unpauses itself when the buffer period ends.",
    params(
        ("x-vault-public-key" = String, Header, description = "Hex Ed25519 public key of the caller"),
        ("x-vault-timestamp" = i64, Header, description = "Unix seconds at signing time"),
        ("x-vault-signature" = String, Header, description = "Hex Ed25519 signature over method, path, timestamp and body"),
    ),
    responses(
        (status = 200, description = "Vault unpaused", body = PauseStatusResponse),
        (status = 401, description = "Missing or invalid request signature", body = ErrorResponse),
        (status = 403, description = "Caller not authorized", body = ErrorResponse),
        (status = 409, description = "Pause window expired", body = ErrorResponse),
    )
)]
pub async fn unpause(
    State(state): State<AppState>,
    SignedRequest { caller, .. }: SignedRequest,
) -> Result<impl IntoResponse, GatewayError> {
    let snapshot = state.vault_service.unpause(caller).await?;
    let vault = state.vault_service.vault().address().to_string();
    Ok(Json(PauseStatusResponse::new(vault, snapshot)))
}

/// `GET /vault/status`: Pause lifecycle at an instant.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
#[utoipa::path(
    get,
    path = "/api/v1/vault/status",
    tag = "Vault",
    summary = "Get pause status",
    description = "Derives the pause status at `at`, or now when omitted.",
    params(StatusQuery),
    responses(
        (status = 200, description = "Pause lifecycle", body = PauseStatusResponse),
    )
)]
pub async fn status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let snapshot = state.vault_service.pause_snapshot(query.at);
    let vault = state.vault_service.vault().address().to_string();
    Ok(Json(PauseStatusResponse::new(vault, snapshot)))
}

/// Vault lifecycle routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vault/pause", post(pause))
        .route("/vault/unpause", post(unpause))
        .route("/vault/status", get(status))
}
