//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{
    PaginationMeta, PauseStatusResponse, PoolDetailResponse, PoolListResponse,
    PoolSummaryDto, RegisterPoolRequest, RegisteredResponse, ScalingFactorsResponse, TokenDto,
    TokensResponse,
};
use super::handlers::{events, pool, system, vault};
use crate::error::{ErrorBody, ErrorResponse};
use crate::persistence::StoredEvent;

/// Generated OpenAPI document, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "hydra-vault",
        description = "Pool registry and time-gated pause vault."
    ),
    paths(
        pool::register_pool,
        pool::list_pools,
        pool::get_pool,
        pool::get_tokens,
        pool::is_registered,
        pool::get_scaling_factors,
        vault::pause,
        vault::unpause,
        vault::status,
        events::list_events,
        system::health_handler,
    ),
    components(schemas(
        TokenDto,
        PaginationMeta,
        RegisterPoolRequest,
        PoolDetailResponse,
        PoolSummaryDto,
        PoolListResponse,
        TokensResponse,
        RegisteredResponse,
        ScalingFactorsResponse,
        PauseStatusResponse,
        StoredEvent,
        system::HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Pools", description = "Pool registration and queries"),
        (name = "Vault", description = "Pause lifecycle"),
        (name = "Events", description = "Recorded event log"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;
