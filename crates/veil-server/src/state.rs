//! Application state shared across handlers.

use std::sync::Arc;

use veil_session::{InMemoryStore, SessionManager};

use crate::config::ServerConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Session lifecycle manager over `store`.
    pub sessions: SessionManager,

    /// The backing store, for health reporting.
    pub store: Arc<InMemoryStore>,

    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new application state over a store.
    pub fn new(store: Arc<InMemoryStore>, config: ServerConfig) -> Self {
        Self {
            sessions: SessionManager::for_store(store.clone()),
            store,
            config: Arc::new(config),
        }
    }
}
