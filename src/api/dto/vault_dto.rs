//! Vault lifecycle DTOs: pause, unpause, status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::PauseStatus;
use crate::service::PauseSnapshot;

/// Query parameters for `GET /vault/status`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// Instant to evaluate the status at (RFC 3339). Defaults to now.
    pub at: Option<DateTime<Utc>>,
}

/// Pause lifecycle response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PauseStatusResponse {
    /// Vault address.
    pub vault: String,
    /// Derived status.
    #[schema(value_type = String, example = "active")]
    pub status: PauseStatus,
    /// Instant the status was derived for.
    pub at: DateTime<Utc>,
    /// Whether value-moving operations are allowed.
    pub operations_allowed: bool,
    /// Whether the manual pause flag is set.
    pub manually_paused: bool,
    /// End of the pause window.
    pub pause_window_end: DateTime<Utc>,
    /// End of the buffer period.
    pub buffer_period_end: DateTime<Utc>,
}

impl PauseStatusResponse {
    /// Builds the response from a service snapshot.
    #[must_use]
    pub fn new(vault: String, snapshot: PauseSnapshot) -> Self {
        Self {
            vault,
            status: snapshot.status,
            at: snapshot.at,
            operations_allowed: snapshot.operations_allowed,
            manually_paused: snapshot.manually_paused,
            pause_window_end: snapshot.pause_window_end,
            buffer_period_end: snapshot.buffer_period_end,
        }
    }
}
