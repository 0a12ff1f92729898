//! Encryption session lifecycle for Veil.
//!
//! This crate owns the server-side half of an encryption session:
//! - [`InMemoryStore`], a mutex-guarded map of [`StoredSession`] records with a
//!   background reaper that sweeps records older than the configured maximum age
//! - [`SessionManager`], which turns raw records into [`SessionView`]s, computes
//!   expiry and maps storage outcomes onto [`SessionError`]
//!
//! Expiry is two-phase: reads report [`SessionError::Expired`] as soon as a
//! session passes its lifetime, but only the reaper removes the record.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use veil_session::{InMemoryStore, SessionManager, StoreConfig};
//!
//! let config = StoreConfig::new()
//!     .with_max_session_age(Duration::from_secs(600))
//!     .with_cleanup_interval(Duration::from_secs(60));
//!
//! let store = Arc::new(InMemoryStore::new(config));
//! let manager = SessionManager::for_store(store.clone());
//!
//! let id = manager.create_session("aes128", b"0123456789abcdef".to_vec())?;
//! let view = manager.get_session(&id)?;
//!
//! store.close().await;
//! ```

mod config;
mod error;
mod manager;
mod model;
mod reaper;
mod storage;
mod store;

pub use config::{DEFAULT_CLEANUP_INTERVAL, DEFAULT_MAX_SESSION_AGE, StoreConfig};
pub use error::{Result, SessionError, StorageError, StorageResult};
pub use manager::SessionManager;
pub use model::{SessionView, StoredSession};
pub use storage::{SessionStorage, SharedStorage};
pub use store::InMemoryStore;
