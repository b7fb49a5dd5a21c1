//! Event log handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;

use super::parse_address;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};
use crate::persistence::StoredEvent;

/// Default page size for `GET /events`.
pub const DEFAULT_EVENTS_LIMIT: i64 = 100;
/// Largest page size accepted by `GET /events`.
pub const MAX_EVENTS_LIMIT: i64 = 1000;

/// Query parameters for `GET /events`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventsQuery {
    /// Only events with an id greater than this one. Pass the last id of
    /// the previous page to continue. Defaults to 0.
    pub after_id: Option<i64>,
    /// Only events concerning this pool address.
    pub pool: Option<String>,
    /// Page size (1 to 1000, default 100).
    pub limit: Option<i64>,
}

impl EventsQuery {
    /// Cursor and page size with defaults applied and the limit clamped.
    #[must_use]
    pub fn page(&self) -> (i64, i64) {
        let after_id = self.after_id.unwrap_or(0).max(0);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_EVENTS_LIMIT)
            .clamp(1, MAX_EVENTS_LIMIT);
        (after_id, limit)
    }
}

/// `GET /events`: Read back recorded vault events.
///
/// # Errors
///
/// Returns [`GatewayError::PersistenceError`] when the event log is
/// disabled or the query fails, and [`GatewayError::InvalidRequest`] on a
/// malformed pool address.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List recorded events",
    description = "Returns recorded events in insertion order, paged by event id. Requires persistence to be enabled.",
    params(EventsQuery),
    responses(
        (status = 200, description = "Recorded events", body = Vec<StoredEvent>),
        (status = 400, description = "Malformed pool address", body = ErrorResponse),
        (status = 500, description = "Event log disabled or unavailable", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<impl IntoResponse, GatewayError> {
    let pool = query
        .pool
        .as_deref()
        .map(|p| parse_address("pool", p))
        .transpose()?;
    let Some(log) = state.event_log.as_ref() else {
        return Err(GatewayError::PersistenceError(
            "event log is disabled".to_string(),
        ));
    };
    let (after_id, limit) = query.page();
    let events = log.load_events_after(after_id, pool, limit).await?;
    Ok(Json(events))
}

/// Event log routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/events", get(list_events))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_start_of_log() {
        assert_eq!(EventsQuery::default().page(), (0, DEFAULT_EVENTS_LIMIT));
    }

    #[test]
    fn page_clamps_limit_and_negative_cursor() {
        let query = EventsQuery {
            after_id: Some(-5),
            pool: None,
            limit: Some(50_000),
        };
        assert_eq!(query.page(), (0, MAX_EVENTS_LIMIT));

        let query = EventsQuery {
            after_id: Some(42),
            pool: None,
            limit: Some(0),
        };
        assert_eq!(query.page(), (42, 1));
    }
}
