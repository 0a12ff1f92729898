//! Supported algorithm listing.

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Names accepted by `POST /api/v1/session`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AlgorithmsResponse {
    pub names: Vec<String>,
}

/// List supported encryption algorithms.
#[utoipa::path(
    get,
    path = "/api/v1/algorithms",
    responses(
        (status = 200, description = "Supported algorithms", body = AlgorithmsResponse),
    ),
    tag = "algorithms"
)]
pub async fn list_algorithms_handler() -> Json<AlgorithmsResponse> {
    Json(AlgorithmsResponse {
        names: veil_cipher::supported_algorithms()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    })
}
