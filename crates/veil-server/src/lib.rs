//! HTTP API for Veil.
//!
//! Exposes the session store and cipher capability over JSON:
//!
//! - `POST /api/v1/session` opens a session bound to an algorithm and key
//! - `POST /api/v1/session/{id}/encrypt` and `/decrypt` use that key
//! - `GET /api/v1/algorithms` lists the supported ciphers
//! - `GET /health` and the OpenAPI docs at `/api/docs`
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use veil_server::{Server, ServerConfig};
//! use veil_session::{InMemoryStore, StoreConfig};
//!
//! let store = Arc::new(InMemoryStore::new(StoreConfig::default()));
//! let server = Server::new(store.clone(), ServerConfig::default());
//! server.run_with_shutdown(tokio::signal::ctrl_c().map(|_| ())).await?;
//! store.close().await;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ErrorResponse, Result, ServerError};
pub use extract::ActiveSession;
pub use logging::{REQUEST_ID_HEADER, request_logging_middleware};
pub use state::AppState;

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use veil_session::InMemoryStore;

/// The Veil HTTP server.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new server over a session store.
    pub fn new(store: Arc<InMemoryStore>, config: ServerConfig) -> Self {
        Self {
            state: AppState::new(store, config),
        }
    }

    /// Create a server from a pre-built application state.
    pub fn from_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        Router::new()
            .merge(routes::health_routes())
            .nest("/api/v1", self.api_routes())
            .merge(routes::swagger_ui())
            .layer(DefaultBodyLimit::max(self.state.config.max_body_size))
            // Request logging (innermost, sees the assigned request id)
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                logging::request_logging_middleware,
            ))
            .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
            .with_state(self.state.clone())
    }

    /// API routes (v1).
    fn api_routes(&self) -> Router<AppState> {
        use axum::routing::{get, post};

        Router::new()
            .route("/algorithms", get(routes::list_algorithms_handler))
            .route("/session", post(routes::create_session_handler))
            .route(
                "/session/{session_id}/encrypt",
                post(routes::encrypt_handler),
            )
            .route(
                "/session/{session_id}/decrypt",
                post(routes::decrypt_handler),
            )
    }

    /// Run the server on a specific address (useful for testing).
    pub async fn run_on(self, addr: SocketAddr) -> Result<()> {
        let listener = bind(addr).await?;
        self.serve(listener, std::future::pending()).await
    }

    /// Run on the configured address until `shutdown` resolves.
    ///
    /// Once the signal fires no new connections are accepted and this waits
    /// up to `shutdown_timeout` for in-flight requests. After the deadline it
    /// returns without waiting further; connection tasks still running are
    /// left to end with the Tokio runtime.
    pub async fn run_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = bind(self.state.config.bind_address).await?;
        self.serve(listener, shutdown).await
    }

    async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let timeout = self.state.config.shutdown_timeout;
        let router = self.router();

        let fired = Arc::new(Notify::new());
        let signal = {
            let fired = fired.clone();
            async move {
                shutdown.await;
                info!("Shutdown signal received, draining connections");
                fired.notify_one();
            }
        };
        let deadline = async move {
            fired.notified().await;
            tokio::time::sleep(timeout).await;
        };

        let serve = axum::serve(listener, router)
            .with_graceful_shutdown(signal)
            .into_future();

        tokio::select! {
            result = serve => {
                result.map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;
                info!("Server stopped");
            }
            _ = deadline => {
                warn!(
                    timeout_secs = timeout.as_secs(),
                    "Graceful shutdown timed out, abandoning open connections"
                );
            }
        }

        Ok(())
    }
}

async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    let local = listener.local_addr().unwrap_or(addr);
    info!(addr = %local, "Starting server");
    Ok(listener)
}
