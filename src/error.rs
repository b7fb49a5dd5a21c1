//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Vault failures are wrapped unchanged so the caller still sees the exact
//! error kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ErrorKind, PauseError, RegistryError, VaultError};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2002,
///     "message": "pool 0x… is already registered",
///     "details": "validation"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Error category for vault failures
    /// (`validation`, `authorization`, `lifecycle`, `concurrency`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category                    | HTTP Status                     |
/// |-----------|-----------------------------|---------------------------------|
/// | 1000–1999 | Validation                  | 400 Bad Request                 |
/// | 2000–2999 | State/Not Found             | 404 Not Found / 409 Conflict    |
/// | 3000–3999 | Server                      | 500 Internal Server Error       |
/// | 4000–4999 | Lifecycle / Authorization   | 401 / 403 / 409 / 422           |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Error returned by the vault core.
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// Request validation failed before reaching the vault.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request signature is missing, stale, or does not verify.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Unauthenticated(_) => 4100,
            Self::Vault(err) => vault_error_code(err),
            Self::PersistenceError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Vault(err) => vault_status_code(err),
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the vault error category, if this is a vault error.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Vault(err) => Some(err.kind()),
            _ => None,
        }
    }
}

const fn vault_error_code(err: &VaultError) -> u32 {
    match err {
        VaultError::Registry(e) => match e {
            RegistryError::TooFewTokens { .. } => 1101,
            RegistryError::TooManyTokens { .. } => 1102,
            RegistryError::InvalidToken { .. } => 1103,
            RegistryError::DuplicateToken(_) => 1104,
            RegistryError::PoolNotRegistered(_) => 2001,
            RegistryError::PoolAlreadyRegistered(_) => 2002,
            RegistryError::UnsupportedDecimals { .. } => 4003,
        },
        VaultError::Pause(e) => match e {
            PauseError::PauseWindowTooLong { .. } => 1201,
            PauseError::BufferPeriodTooLong { .. } => 1202,
            PauseError::PauseWindowExpired => 4001,
        },
        VaultError::VaultPaused => 4002,
        VaultError::Unauthorized { .. } => 4101,
        VaultError::Reentrant => 4201,
    }
}

const fn vault_status_code(err: &VaultError) -> StatusCode {
    match err {
        VaultError::Registry(RegistryError::PoolNotRegistered(_)) => StatusCode::NOT_FOUND,
        VaultError::Registry(RegistryError::PoolAlreadyRegistered(_))
        | VaultError::Pause(PauseError::PauseWindowExpired)
        | VaultError::VaultPaused
        | VaultError::Reentrant => StatusCode::CONFLICT,
        VaultError::Registry(RegistryError::UnsupportedDecimals { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        VaultError::Registry(_) | VaultError::Pause(_) => StatusCode::BAD_REQUEST,
        VaultError::Unauthorized { .. } => StatusCode::FORBIDDEN,
    }
}

fn kind_str(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "validation",
        ErrorKind::Authorization => "authorization",
        ErrorKind::Lifecycle => "lifecycle",
        ErrorKind::Concurrency => "concurrency",
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: self.kind().map(|k| kind_str(k).to_string()),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, Address};

    #[test]
    fn not_registered_maps_to_404() {
        let err = GatewayError::from(VaultError::from(RegistryError::PoolNotRegistered(
            Address::repeat_byte(1),
        )));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
        assert_eq!(err.kind(), Some(ErrorKind::Validation));
    }

    #[test]
    fn unauthorized_maps_to_403() {
        let err = GatewayError::from(VaultError::Unauthorized {
            action: Action::Pause,
            caller: Address::repeat_byte(2),
        });
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.kind(), Some(ErrorKind::Authorization));
    }

    #[test]
    fn lifecycle_maps_to_conflict() {
        for err in [
            VaultError::VaultPaused,
            VaultError::Pause(PauseError::PauseWindowExpired),
            VaultError::Reentrant,
        ] {
            assert_eq!(GatewayError::from(err).status_code(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = GatewayError::from(VaultError::from(RegistryError::DuplicateToken(
            Address::repeat_byte(3),
        )));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1104);
    }

    #[test]
    fn unauthenticated_maps_to_401() {
        let err = GatewayError::Unauthenticated("missing header".to_string());
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), 4100);
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn into_response_sets_status() {
        let response = GatewayError::InvalidRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
