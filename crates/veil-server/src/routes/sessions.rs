//! Session creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use veil_cipher::Algorithm;

use crate::error::{ErrorResponse, ServerError};
use crate::state::AppState;

/// Request to open an encryption session.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    /// Algorithm name, e.g. `aes256` or `AES-256`.
    #[serde(default)]
    pub algorithm: String,
    /// Key material; its UTF-8 bytes must match the algorithm's key size.
    #[serde(default)]
    pub key: String,
}

/// Identifier of a newly created session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSessionResponse {
    pub id: String,
}

/// POST /api/v1/session - Open a session bound to an algorithm and key.
#[utoipa::path(
    post,
    path = "/api/v1/session",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = CreateSessionResponse),
        (status = 400, description = "Invalid algorithm or key", body = ErrorResponse),
        (status = 500, description = "Session storage failure", body = ErrorResponse),
    ),
    tag = "sessions"
)]
pub async fn create_session_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ServerError> {
    let Json(request) = payload?;

    if request.algorithm.trim().is_empty() {
        return Err(ServerError::BadRequest("algorithm is required".to_string()));
    }
    let algorithm: Algorithm = request.algorithm.parse()?;

    if request.key.is_empty() {
        return Err(ServerError::BadRequest("key is required".to_string()));
    }
    let key = request.key.into_bytes();
    if !veil_cipher::validate_key_size(algorithm, &key) {
        return Err(ServerError::BadRequest(format!(
            "invalid key size for {}: expected {} bytes, got {}",
            algorithm,
            algorithm.key_len(),
            key.len()
        )));
    }

    let id = state.sessions.create_session(algorithm.as_str(), key)?;

    Ok((StatusCode::CREATED, Json(CreateSessionResponse { id })))
}
