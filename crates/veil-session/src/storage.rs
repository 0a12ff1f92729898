//! Storage backend trait.
//!
//! [`SessionStorage`] decouples the lifecycle manager from the concrete
//! store. The in-memory store never fails while open, but the contract
//! allows other backends to report faults, which the manager surfaces as
//! [`SessionError::Database`](crate::SessionError::Database).

use std::sync::Arc;

use crate::error::StorageResult;
use crate::model::StoredSession;

/// Keyed storage of session records.
pub trait SessionStorage: Send + Sync {
    /// Store a new record and return its freshly generated identifier.
    fn write(&self, algorithm: &str, key: &[u8]) -> StorageResult<String>;

    /// Look up a record by identifier.
    ///
    /// Returns `Ok(None)` when no record exists. Backends never judge
    /// expiry here.
    fn read(&self, id: &str) -> StorageResult<Option<StoredSession>>;
}

/// Shared handle to a storage backend.
pub type SharedStorage = Arc<dyn SessionStorage>;
