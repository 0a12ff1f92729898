//! Typed extractors.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use veil_cipher::Algorithm;
use veil_session::SessionView;

use crate::error::ServerError;
use crate::state::AppState;

/// A live session resolved from the `{session_id}` path segment.
///
/// Handlers that take this extractor only run for sessions that exist and
/// have not expired. Resolution happens before the request body is read.
pub struct ActiveSession {
    /// Session identifier from the path.
    pub id: String,
    /// Parsed algorithm of the session.
    pub algorithm: Algorithm,
    /// Session record.
    pub view: SessionView,
}

impl FromRequestParts<AppState> for ActiveSession {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state).await?;

        let view = state.sessions.get_session(&id)?;

        // Sessions are only created with validated names, so a parse failure
        // here means the stored record is corrupt.
        let algorithm = view.algorithm.parse::<Algorithm>().map_err(|e| {
            ServerError::Internal(format!("Session '{}' has unusable algorithm: {}", id, e))
        })?;

        Ok(Self {
            id,
            algorithm,
            view,
        })
    }
}
