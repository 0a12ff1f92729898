//! Domain-level session lifecycle on top of a storage backend.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error};

use crate::error::{Result, SessionError};
use crate::model::SessionView;
use crate::storage::SharedStorage;
use crate::store::InMemoryStore;

/// Creates sessions and resolves identifiers into valid [`SessionView`]s.
///
/// The manager never deletes records. An expired session keeps reporting
/// [`SessionError::Expired`] until the store's reaper removes it, after which
/// it reports [`SessionError::NotFound`].
#[derive(Clone)]
pub struct SessionManager {
    storage: SharedStorage,
    max_session_age: Duration,
}

impl SessionManager {
    /// Create a manager over `storage` with the given session lifetime.
    pub fn new(storage: SharedStorage, max_session_age: Duration) -> Self {
        Self {
            storage,
            max_session_age,
        }
    }

    /// Create a manager over an in-memory store, sharing its session lifetime.
    ///
    /// The reaper and the manager then agree on when a session ends.
    pub fn for_store(store: Arc<InMemoryStore>) -> Self {
        let max_session_age = store.config().max_session_age;
        Self::new(store, max_session_age)
    }

    /// Store a new session and return its identifier.
    pub fn create_session(&self, algorithm: &str, key: Vec<u8>) -> Result<String> {
        let id = self.storage.write(algorithm, &key).map_err(|e| {
            error!(algorithm, error = %e, "Failed to write session");
            SessionError::from(e)
        })?;

        debug!(session_id = %id, algorithm, "Session created");
        Ok(id)
    }

    /// Resolve a session identifier.
    ///
    /// A session whose expiry is at or before the current time is reported as
    /// expired even if it is still stored.
    pub fn get_session(&self, id: &str) -> Result<SessionView> {
        let record = self
            .storage
            .read(id)
            .map_err(|e| {
                error!(session_id = %id, error = %e, "Failed to read session");
                SessionError::from(e)
            })?
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let expires_at = record.expires_at(self.max_session_age);
        if expires_at <= Utc::now() {
            debug!(session_id = %id, %expires_at, "Session expired");
            return Err(SessionError::Expired(id.to_string()));
        }

        Ok(SessionView {
            algorithm: record.algorithm,
            key: record.key,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StorageError, StorageResult};
    use crate::model::StoredSession;
    use crate::storage::SessionStorage;
    use chrono::{DateTime, TimeDelta};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    const MOCK_ID: &str = "mock_session_id";

    /// Storage double that hands out a fixed id and lets tests rewrite timestamps.
    #[derive(Default)]
    struct MockStorage {
        sessions: Mutex<HashMap<String, StoredSession>>,
    }

    impl MockStorage {
        fn set_created_at(&self, id: &str, created_at: DateTime<Utc>) {
            self.sessions.lock().get_mut(id).unwrap().created_at = created_at;
        }
    }

    impl SessionStorage for MockStorage {
        fn write(&self, algorithm: &str, key: &[u8]) -> StorageResult<String> {
            self.sessions.lock().insert(
                MOCK_ID.to_string(),
                StoredSession::new(algorithm, key.to_vec()),
            );
            Ok(MOCK_ID.to_string())
        }

        fn read(&self, id: &str) -> StorageResult<Option<StoredSession>> {
            Ok(self.sessions.lock().get(id).cloned())
        }
    }

    /// Storage double whose every operation fails.
    struct FailingStorage;

    impl SessionStorage for FailingStorage {
        fn write(&self, _algorithm: &str, _key: &[u8]) -> StorageResult<String> {
            Err(StorageError::Backend("connection refused".to_string()))
        }

        fn read(&self, _id: &str) -> StorageResult<Option<StoredSession>> {
            Err(StorageError::Backend("connection refused".to_string()))
        }
    }

    fn manager_with_mock() -> (SessionManager, Arc<MockStorage>) {
        let storage = Arc::new(MockStorage::default());
        let manager = SessionManager::new(storage.clone(), Duration::from_secs(3600));
        (manager, storage)
    }

    #[test]
    fn test_create_session_stores_record() {
        let (manager, storage) = manager_with_mock();

        let id = manager
            .create_session("mock_algorithm", b"mock_key".to_vec())
            .unwrap();
        assert_eq!(id, MOCK_ID);

        let sessions = storage.sessions.lock();
        let record = sessions.get(&id).expect("record should be stored");
        assert_eq!(record.algorithm, "mock_algorithm");
        assert_eq!(record.key, b"mock_key".to_vec());
    }

    #[test]
    fn test_get_session_not_found() {
        let (manager, _) = manager_with_mock();

        let err = manager.get_session("non_existent_session_id").unwrap_err();
        assert_eq!(
            err,
            SessionError::NotFound("non_existent_session_id".to_string())
        );
    }

    #[test]
    fn test_get_session_expired() {
        let (manager, storage) = manager_with_mock();
        let id = manager.create_session("aes128", vec![0; 16]).unwrap();

        storage.set_created_at(&id, Utc::now() - TimeDelta::hours(2));

        let err = manager.get_session(&id).unwrap_err();
        assert!(matches!(err, SessionError::Expired(_)));
        // Expiry is reported, not enforced: the record is still stored.
        assert!(storage.read(&id).unwrap().is_some());
    }

    #[test]
    fn test_get_session_expiry_boundary_is_expired() {
        let storage = Arc::new(MockStorage::default());
        let manager = SessionManager::new(storage.clone(), Duration::ZERO);
        let id = manager.create_session("aes128", vec![0; 16]).unwrap();

        // created_at + 0 is never after "now".
        assert!(matches!(
            manager.get_session(&id),
            Err(SessionError::Expired(_))
        ));
    }

    #[test]
    fn test_get_session_valid() {
        let (manager, storage) = manager_with_mock();
        let id = manager
            .create_session("mock_algorithm", b"mock_key".to_vec())
            .unwrap();

        let created_at = Utc::now() + TimeDelta::hours(2);
        storage.set_created_at(&id, created_at);

        let view = manager.get_session(&id).unwrap();
        assert_eq!(view.algorithm, "mock_algorithm");
        assert_eq!(view.key, b"mock_key".to_vec());
        assert_eq!(view.expires_at, created_at + TimeDelta::hours(1));
    }

    #[test]
    fn test_get_session_fresh_expires_in_future() {
        let (manager, _) = manager_with_mock();
        let id = manager.create_session("des", b"01234567".to_vec()).unwrap();

        let view = manager.get_session(&id).unwrap();
        assert!(view.expires_at > Utc::now());
    }

    #[test]
    fn test_for_store_uses_store_lifetime() {
        use crate::config::StoreConfig;

        let expiring = Arc::new(InMemoryStore::new(
            StoreConfig::new()
                .with_max_session_age(Duration::ZERO)
                .with_cleanup_task(false),
        ));
        let manager = SessionManager::for_store(expiring);
        let id = manager.create_session("des", b"01234567".to_vec()).unwrap();
        assert!(matches!(
            manager.get_session(&id),
            Err(SessionError::Expired(_))
        ));

        let lasting = Arc::new(InMemoryStore::new(
            StoreConfig::new()
                .with_max_session_age(Duration::from_secs(600))
                .with_cleanup_task(false),
        ));
        let manager = SessionManager::for_store(lasting);
        let id = manager.create_session("des", b"01234567".to_vec()).unwrap();
        let view = manager.get_session(&id).unwrap();
        assert!(view.expires_at > Utc::now() + TimeDelta::seconds(590));
    }

    #[test]
    fn test_storage_failures_are_database_errors() {
        let manager = SessionManager::new(Arc::new(FailingStorage), Duration::from_secs(60));

        assert!(matches!(
            manager.create_session("aes128", vec![0; 16]),
            Err(SessionError::Database(_))
        ));
        assert!(matches!(
            manager.get_session("anything"),
            Err(SessionError::Database(_))
        ));
    }
}
