//! Pool registry handlers: register, list, get, tokens, scaling factors.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::parse_address;
use crate::api::auth::SignedJson;
use crate::api::dto::{
    PaginationParams, PoolDetailResponse, PoolListResponse, PoolSummaryDto, RegisterPoolRequest,
    RegisteredResponse, ScalingFactorsResponse, TokenDto, TokensResponse,
};
use crate::app_state::AppState;
use crate::domain::TokenDescriptor;
use crate::error::{ErrorResponse, GatewayError};
use crate::service::PoolRegistration;

/// `POST /pools`: Register a pool with the vault.
///
/// # Errors
///
/// Returns [`GatewayError`] on a bad signature, malformed addresses, failed authorization,
/// a paused vault, or invalid token lists.
#[utoipa::path(
    post,
    path = "/api/v1/pools",
    tag = "Pools",
    summary = "Register a pool",
    description = "Registers a pool and its ordered token list. The caller must hold the `register_pool` action for the pool address and the vault must not be paused.",
    request_body = RegisterPoolRequest,
    params(
        ("x-vault-public-key" = String, Header, description = "Hex Ed25519 public key of the caller"),
        ("x-vault-timestamp" = i64, Header, description = "Unix seconds at signing time"),
        ("x-vault-signature" = String, Header, description = "Hex Ed25519 signature over method, path, timestamp and body"),
    ),
    responses(
        (status = 201, description = "Pool registered", body = PoolDetailResponse),
        (status = 400, description = "Invalid request or token list", body = ErrorResponse),
        (status = 401, description = "Missing or invalid request signature", body = ErrorResponse),
        (status = 403, description = "Caller not authorized", body = ErrorResponse),
        (status = 409, description = "Already registered or vault paused", body = ErrorResponse),
    )
)]
pub async fn register_pool(
    State(state): State<AppState>,
    SignedJson { caller, body: req }: SignedJson<RegisterPoolRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let pool = parse_address("pool", &req.pool)?;
    let factory = parse_address("factory", &req.factory)?;
    let tokens = req
        .tokens
        .iter()
        .enumerate()
        .map(|(i, t)| {
            parse_address(&format!("tokens[{i}].address"), &t.address)
                .map(|address| TokenDescriptor::new(address, t.decimals))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let entry = state
        .vault_service
        .register_pool(
            caller,
            PoolRegistration {
                pool,
                name: req.name,
                symbol: req.symbol,
                factory,
                tokens,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PoolDetailResponse::from(&entry))))
}

/// `GET /pools`: List registered pools with pagination.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
#[utoipa::path(
    get,
    path = "/api/v1/pools",
    tag = "Pools",
    summary = "List pools",
    description = "Returns a paginated list of registered pools in registration order.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated pool list", body = PoolListResponse),
    )
)]
pub async fn list_pools(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let params = params.clamped();
    let summaries = state.vault_service.list_pools();
    let pagination = params.meta(summaries.len());

    let data: Vec<PoolSummaryDto> = summaries
        .into_iter()
        .skip(params.offset())
        .take(params.per_page as usize)
        .map(PoolSummaryDto::from)
        .collect();

    Ok(Json(PoolListResponse { data, pagination }))
}

/// `GET /pools/{address}`: Get a registered pool.
///
/// # Errors
///
/// Returns [`GatewayError`] if the address is malformed or the pool is not
/// registered.
#[utoipa::path(
    get,
    path = "/api/v1/pools/{address}",
    tag = "Pools",
    summary = "Get pool details",
    params(
        ("address" = String, Path, description = "Pool address"),
    ),
    responses(
        (status = 200, description = "Pool details", body = PoolDetailResponse),
        (status = 404, description = "Pool not registered", body = ErrorResponse),
    )
)]
pub async fn get_pool(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let pool = parse_address("address", &address)?;
    let entry = state.vault_service.pool(pool)?;
    Ok(Json(PoolDetailResponse::from(&entry)))
}

/// `GET /pools/{address}/tokens`: Tokens in canonical order.
///
/// # Errors
///
/// Returns [`GatewayError`] if the address is malformed or the pool is not
/// registered.
#[utoipa::path(
    get,
    path = "/api/v1/pools/{address}/tokens",
    tag = "Pools",
    summary = "Get pool tokens",
    params(
        ("address" = String, Path, description = "Pool address"),
    ),
    responses(
        (status = 200, description = "Registered tokens", body = TokensResponse),
        (status = 404, description = "Pool not registered", body = ErrorResponse),
    )
)]
pub async fn get_tokens(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let pool = parse_address("address", &address)?;
    let tokens = state.vault_service.tokens_of(pool)?;
    Ok(Json(TokensResponse {
        pool: pool.to_string(),
        tokens: tokens.iter().map(TokenDto::from).collect(),
    }))
}

/// `GET /pools/{address}/registered`: Registration check.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] if the address is malformed.
#[utoipa::path(
    get,
    path = "/api/v1/pools/{address}/registered",
    tag = "Pools",
    summary = "Check registration",
    description = "Returns whether the address has been registered. Never returns 404.",
    params(
        ("address" = String, Path, description = "Pool address"),
    ),
    responses(
        (status = 200, description = "Registration flag", body = RegisteredResponse),
        (status = 400, description = "Malformed address", body = ErrorResponse),
    )
)]
pub async fn is_registered(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let pool = parse_address("address", &address)?;
    Ok(Json(RegisteredResponse {
        pool: pool.to_string(),
        registered: state.vault_service.is_registered(pool),
    }))
}

/// `GET /pools/{address}/scaling-factors`: 18-decimal scaling factors.
///
/// # Errors
///
/// Returns [`GatewayError`] if the address is malformed, the pool is not
/// registered, or a token has more than 18 decimals.
#[utoipa::path(
    get,
    path = "/api/v1/pools/{address}/scaling-factors",
    tag = "Pools",
    summary = "Get token scaling factors",
    params(
        ("address" = String, Path, description = "Pool address"),
    ),
    responses(
        (status = 200, description = "Scaling factors", body = ScalingFactorsResponse),
        (status = 404, description = "Pool not registered", body = ErrorResponse),
        (status = 422, description = "Token with more than 18 decimals", body = ErrorResponse),
    )
)]
pub async fn get_scaling_factors(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    let pool = parse_address("address", &address)?;
    let factors = state.vault_service.scaling_factors(pool)?;
    Ok(Json(ScalingFactorsResponse {
        pool: pool.to_string(),
        factors: factors.iter().map(u128::to_string).collect(),
    }))
}

/// Pool registry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pools", post(register_pool).get(list_pools))
        .route("/pools/{address}", get(get_pool))
        .route("/pools/{address}/tokens", get(get_tokens))
        .route("/pools/{address}/registered", get(is_registered))
        .route("/pools/{address}/scaling-factors", get(get_scaling_factors))
}
