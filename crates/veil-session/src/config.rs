//! Configuration for the session store.

use std::time::Duration;

use veil_config::defaults;

/// Default lifetime of a session (ten minutes).
pub const DEFAULT_MAX_SESSION_AGE: Duration = Duration::from_secs(defaults::MAX_SESSION_AGE_SECS);

/// Default interval between reaper sweeps.
pub const DEFAULT_CLEANUP_INTERVAL: Duration =
    Duration::from_secs(defaults::CLEANUP_INTERVAL_SECS);

/// Shortest poll interval the reaper will run at.
/// `tokio::time::interval` panics on a zero period.
pub(crate) const MIN_CLEANUP_INTERVAL: Duration = Duration::from_millis(1);

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long a session lives after it is written.
    pub max_session_age: Duration,

    /// Whether to run the background reaper.
    /// If false, expired records stay in memory until the store is closed
    /// or [`InMemoryStore::sweep_expired`](crate::InMemoryStore::sweep_expired) is called.
    pub enable_cleanup_task: bool,

    /// Interval between reaper sweeps. Independent of `max_session_age`.
    pub cleanup_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_session_age: DEFAULT_MAX_SESSION_AGE,
            enable_cleanup_task: true,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum session age.
    pub fn with_max_session_age(mut self, age: Duration) -> Self {
        self.max_session_age = age;
        self
    }

    /// Enable or disable the background reaper.
    pub fn with_cleanup_task(mut self, enabled: bool) -> Self {
        self.enable_cleanup_task = enabled;
        self
    }

    /// Set the reaper poll interval.
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// The poll interval the reaper actually uses.
    pub(crate) fn effective_cleanup_interval(&self) -> Duration {
        self.cleanup_interval.max(MIN_CLEANUP_INTERVAL)
    }
}
