//! Error types for session storage and lifecycle operations.

/// Fault reported by a storage backend.
///
/// Absence of a record is not a fault; backends return `Ok(None)` for that.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The store has been closed and no longer accepts operations.
    #[error("Session store is closed")]
    Closed,

    /// Backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage backend operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Domain-level session error.
///
/// Deliberately coarse: each kind maps to exactly one response class at the
/// HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The storage layer failed.
    #[error("Database error: {0}")]
    Database(String),

    /// No session exists for the identifier.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// The session exists but is past its lifetime.
    #[error("Session expired: {0}")]
    Expired(String),
}

impl From<StorageError> for SessionError {
    fn from(e: StorageError) -> Self {
        SessionError::Database(e.to_string())
    }
}

/// Result type for session lifecycle operations.
pub type Result<T> = std::result::Result<T, SessionError>;
