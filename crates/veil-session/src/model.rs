//! Session records and views.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// A session record as held by a storage backend.
///
/// Records are immutable once written.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredSession {
    /// Canonical lowercase algorithm identifier.
    pub algorithm: String,

    /// Symmetric key material.
    pub key: Vec<u8>,

    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

impl StoredSession {
    /// Create a record stamped with the current time.
    pub fn new(algorithm: impl Into<String>, key: Vec<u8>) -> Self {
        Self::with_created_at(algorithm, key, Utc::now())
    }

    /// Create a record with an explicit creation time.
    pub fn with_created_at(
        algorithm: impl Into<String>,
        key: Vec<u8>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            key,
            created_at,
        }
    }

    /// When this record stops being valid, given a maximum age.
    pub fn expires_at(&self, max_age: Duration) -> DateTime<Utc> {
        self.created_at
            .checked_add_signed(to_time_delta(max_age))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the record is strictly older than `max_age` at `now`.
    ///
    /// This is the reaper's deletion rule.
    pub fn is_older_than(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at) > to_time_delta(max_age)
    }
}

impl fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSession")
            .field("algorithm", &self.algorithm)
            .field("key", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A valid session as seen by callers of the lifecycle manager.
///
/// Built fresh on every successful lookup; never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionView {
    /// Canonical lowercase algorithm identifier.
    pub algorithm: String,

    /// Symmetric key material.
    pub key: Vec<u8>,

    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for SessionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionView")
            .field("algorithm", &self.algorithm)
            .field("key", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Convert a std duration to a chrono delta, saturating on overflow.
pub(crate) fn to_time_delta(d: Duration) -> TimeDelta {
    TimeDelta::from_std(d).unwrap_or(TimeDelta::MAX)
}
