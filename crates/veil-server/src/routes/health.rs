//! Health endpoint reporting the state of the session store.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Store status as seen by the health endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` while the store accepts sessions, `closed` after shutdown began.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Records currently held, including expired ones awaiting a sweep.
    pub sessions: usize,
    /// Whether the session store has been closed.
    pub closed: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Session store is open", body = HealthResponse),
        (status = 503, description = "Session store is closed", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let closed = state.store.is_closed();
    let (code, status) = if closed {
        (StatusCode::SERVICE_UNAVAILABLE, "closed")
    } else {
        (StatusCode::OK, "ok")
    };

    let body = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: state.store.len(),
        closed,
    };
    (code, Json(body))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
