//! API routes.

pub mod algorithms;
pub mod crypto;
pub mod health;
pub mod openapi;
pub mod sessions;

pub use algorithms::{AlgorithmsResponse, list_algorithms_handler};
pub use crypto::{
    DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse, decrypt_handler,
    encrypt_handler,
};
pub use health::{HealthResponse, health_routes};
pub use openapi::{ApiDoc, swagger_ui};
pub use sessions::{CreateSessionRequest, CreateSessionResponse, create_session_handler};
