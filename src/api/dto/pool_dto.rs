//! Pool-related DTOs for register, get, and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::{PaginationMeta, TokenDto};
use crate::domain::{PoolEntry, PoolSummary};

/// Request body for `POST /pools`. The caller comes from the signature.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterPoolRequest {
    /// Pool address.
    pub pool: String,
    /// Human-readable pool name.
    #[serde(default)]
    pub name: String,
    /// Pool share symbol.
    #[serde(default)]
    pub symbol: String,
    /// Factory that deployed the pool.
    pub factory: String,
    /// Tokens in canonical order.
    pub tokens: Vec<TokenDto>,
}

/// Full pool record returned by `POST /pools` and `GET /pools/{address}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolDetailResponse {
    /// Pool address.
    pub pool: String,
    /// Pool name.
    pub name: String,
    /// Pool symbol.
    pub symbol: String,
    /// Factory address.
    pub factory: String,
    /// Tokens in canonical order.
    pub tokens: Vec<TokenDto>,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

impl From<&PoolEntry> for PoolDetailResponse {
    fn from(entry: &PoolEntry) -> Self {
        Self {
            pool: entry.pool.to_string(),
            name: entry.name.clone(),
            symbol: entry.symbol.clone(),
            factory: entry.factory.to_string(),
            tokens: entry.tokens.iter().map(TokenDto::from).collect(),
            registered_at: entry.registered_at,
        }
    }
}

/// Pool summary for list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolSummaryDto {
    /// Pool address.
    pub pool: String,
    /// Pool name.
    pub name: String,
    /// Pool symbol.
    pub symbol: String,
    /// Number of tokens.
    pub token_count: usize,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

impl From<PoolSummary> for PoolSummaryDto {
    fn from(s: PoolSummary) -> Self {
        Self {
            pool: s.pool.to_string(),
            name: s.name,
            symbol: s.symbol,
            token_count: s.token_count,
            registered_at: s.registered_at,
        }
    }
}

/// Paginated list response for `GET /pools`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolListResponse {
    /// Pools on the requested page, in registration order.
    pub data: Vec<PoolSummaryDto>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Response body for `GET /pools/{address}/tokens`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokensResponse {
    /// Pool address.
    pub pool: String,
    /// Tokens in canonical order.
    pub tokens: Vec<TokenDto>,
}

/// Response body for `GET /pools/{address}/registered`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredResponse {
    /// Pool address.
    pub pool: String,
    /// Whether the pool is registered.
    pub registered: bool,
}

/// Response body for `GET /pools/{address}/scaling-factors`.
///
/// Factors are decimal strings to avoid precision loss on `u128`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScalingFactorsResponse {
    /// Pool address.
    pub pool: String,
    /// One factor per token, in canonical order.
    pub factors: Vec<String>,
}
