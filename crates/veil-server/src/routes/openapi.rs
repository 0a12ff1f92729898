//! OpenAPI documentation configuration.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::{algorithms, crypto, health, sessions};
use crate::error::ErrorResponse;

/// OpenAPI documentation for the Veil API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Veil API",
        description = "Session-scoped symmetric encryption over HTTP",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Local server"),
    ),
    paths(
        health::health,
        algorithms::list_algorithms_handler,
        sessions::create_session_handler,
        crypto::encrypt_handler,
        crypto::decrypt_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            health::HealthResponse,
            algorithms::AlgorithmsResponse,
            sessions::CreateSessionRequest,
            sessions::CreateSessionResponse,
            crypto::EncryptRequest,
            crypto::EncryptResponse,
            crypto::DecryptRequest,
            crypto::DecryptResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "algorithms", description = "Supported ciphers"),
        (name = "sessions", description = "Encryption session management"),
        (name = "crypto", description = "Encrypt and decrypt with a session key"),
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi())
}
