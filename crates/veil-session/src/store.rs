//! In-memory session store with a background reaper.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::{StorageError, StorageResult};
use crate::model::StoredSession;
use crate::reaper;
use crate::storage::SessionStorage;

/// State shared between the store handle and the reaper task.
pub(crate) struct StoreInner {
    /// Session records by identifier. `None` once the store is closed.
    sessions: Mutex<Option<HashMap<String, StoredSession>>>,

    /// Records strictly older than this are swept.
    max_session_age: Duration,
}

impl StoreInner {
    /// Delete every record older than the maximum age.
    ///
    /// Holds the lock for the whole scan. Returns `None` if the store is closed.
    pub(crate) fn sweep(&self) -> Option<usize> {
        let started = Instant::now();
        let mut guard = self.sessions.lock();
        let sessions = guard.as_mut()?;

        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_older_than(self.max_session_age, now));
        let deleted = before - sessions.len();
        let remaining = sessions.len();
        drop(guard);

        info!(
            deleted,
            remaining,
            duration_ms = %started.elapsed().as_millis(),
            "Session sweep completed"
        );

        Some(deleted)
    }
}

/// Volatile session store.
///
/// A single mutex guards the whole map; reads and writes hold it briefly,
/// reaper sweeps hold it for a full scan. Constructing the store with the
/// cleanup task enabled spawns the reaper, so it must happen inside a Tokio
/// runtime.
///
/// Call [`close`](Self::close) during shutdown. Afterwards every operation
/// fails with [`StorageError::Closed`]. Dropping the store without closing it
/// still stops the reaper.
pub struct InMemoryStore {
    inner: Arc<StoreInner>,
    config: StoreConfig,
    cancel: CancellationToken,
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl InMemoryStore {
    /// Create a store and, if enabled, start its reaper.
    pub fn new(config: StoreConfig) -> Self {
        let inner = Arc::new(StoreInner {
            sessions: Mutex::new(Some(HashMap::new())),
            max_session_age: config.max_session_age,
        });
        let cancel = CancellationToken::new();

        let reaper = if config.enable_cleanup_task {
            let interval = config.effective_cleanup_interval();
            debug!(
                interval_ms = %interval.as_millis(),
                max_session_age_secs = config.max_session_age.as_secs(),
                "Starting session reaper"
            );
            Some(reaper::spawn(Arc::clone(&inner), interval, cancel.clone()))
        } else {
            None
        };

        Self {
            inner,
            config,
            cancel,
            reaper: Mutex::new(reaper),
        }
    }

    /// Get the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Number of records currently held, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.inner
            .sessions
            .lock()
            .as_ref()
            .map_or(0, HashMap::len)
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.sessions.lock().is_none()
    }

    /// Run one reaper pass now.
    ///
    /// Returns the number of records deleted; 0 once the store is closed.
    pub fn sweep_expired(&self) -> usize {
        self.inner.sweep().unwrap_or(0)
    }

    /// Stop the reaper and drop every record.
    ///
    /// Waits for the reaper task to exit. Safe to call more than once.
    pub async fn close(&self) {
        self.cancel.cancel();

        let handle = self.reaper.lock().take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
        {
            warn!(error = %e, "Session reaper terminated abnormally");
        }

        let dropped = self.inner.sessions.lock().take().map(|s| s.len());
        if let Some(dropped) = dropped {
            info!(dropped, "Session store closed");
        }
    }

    /// Insert a record under a fresh identifier.
    fn insert(&self, record: StoredSession) -> StorageResult<String> {
        let mut guard = self.inner.sessions.lock();
        let sessions = guard.as_mut().ok_or(StorageError::Closed)?;

        let mut id = Uuid::new_v4().to_string();
        while sessions.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }
        sessions.insert(id.clone(), record);

        trace!(session_id = %id, store_size = sessions.len(), "Session written");
        Ok(id)
    }

    #[cfg(test)]
    pub(crate) fn insert_record(&self, record: StoredSession) -> String {
        self.insert(record).expect("store is open")
    }
}

impl SessionStorage for InMemoryStore {
    fn write(&self, algorithm: &str, key: &[u8]) -> StorageResult<String> {
        self.insert(StoredSession::new(algorithm, key.to_vec()))
    }

    fn read(&self, id: &str) -> StorageResult<Option<StoredSession>> {
        let guard = self.inner.sessions.lock();
        let sessions = guard.as_ref().ok_or(StorageError::Closed)?;
        Ok(sessions.get(id).cloned())
    }
}

impl Drop for InMemoryStore {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
