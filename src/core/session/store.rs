//! Session store
//!
//! Single source of truth for "who is logged in". The session is persisted as
//! three string keys and is only reported as authenticated when all three are
//! present and well-formed. Anything else is treated as a corrupt partial
//! write and cleared on the next read.

use super::identity::{Identity, ProfileUpdate};
use super::storage::{KeyValueStorage, StorageError};

/// Storage key for the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Storage key for the serialized identity
pub const USER_KEY: &str = "user";

/// A fully populated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub identity: Identity,
}

/// Session lifecycle state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Anonymous => None,
        }
    }
}

/// Session store over a key/value backend. Clones share the backend.
#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Underlying backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist a new session. On a failed write the partial state is rolled back.
    pub fn save(
        &self,
        access_token: &str,
        refresh_token: &str,
        identity: &Identity,
    ) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(identity).map_err(|e| StorageError::Write {
            key: USER_KEY.to_string(),
            reason: e.to_string(),
        })?;

        let result = self
            .storage
            .set_item(USER_KEY, &user_json)
            .and_then(|_| self.storage.set_item(REFRESH_TOKEN_KEY, refresh_token))
            // Access token last: it is the "authenticated" marker
            .and_then(|_| self.storage.set_item(ACCESS_TOKEN_KEY, access_token));

        if let Err(e) = result {
            tracing::warn!("Failed to persist session, rolling back: {}", e);
            if let Err(clear_err) = self.clear() {
                tracing::warn!("Rollback after failed save also failed: {}", clear_err);
            }
            return Err(e);
        }

        tracing::debug!("Session saved for {} ({})", identity.email, identity.role);
        Ok(())
    }

    /// Replace the access token after a refresh.
    ///
    /// Returns `false` without writing anything when no session is stored, so a
    /// session cleared concurrently is never partially resurrected.
    pub fn update_access_token(&self, access_token: &str) -> Result<bool, StorageError> {
        if self.load().is_none() {
            tracing::debug!("Access token update skipped: no active session");
            return Ok(false);
        }
        self.storage.set_item(ACCESS_TOKEN_KEY, access_token)?;
        Ok(true)
    }

    /// Replace the editable identity fields after a profile edit.
    ///
    /// Returns the updated identity, or `None` when anonymous.
    pub fn update_identity(&self, update: ProfileUpdate) -> Result<Option<Identity>, StorageError> {
        let Some(session) = self.load() else {
            return Ok(None);
        };
        let identity = session.identity.with_profile(update);
        let user_json = serde_json::to_string(&identity).map_err(|e| StorageError::Write {
            key: USER_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.storage.set_item(USER_KEY, &user_json)?;
        Ok(Some(identity))
    }

    /// Remove all session keys. Idempotent.
    pub fn clear(&self) -> Result<(), StorageError> {
        // Access token first so readers stop seeing "authenticated" immediately
        self.storage.remove_item(ACCESS_TOKEN_KEY)?;
        self.storage.remove_item(REFRESH_TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        Ok(())
    }

    /// Validated snapshot of the stored session
    ///
    /// A failed read reports Anonymous but leaves storage alone: only a triple
    /// that was read in full and found partial or corrupt is cleared.
    pub fn load(&self) -> Option<Session> {
        let keys = self.read(ACCESS_TOKEN_KEY).and_then(|access_token| {
            let refresh_token = self.read(REFRESH_TOKEN_KEY)?;
            let user_json = self.read(USER_KEY)?;
            Ok((access_token, refresh_token, user_json))
        });
        let (access_token, refresh_token, user_json) = match keys {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!("Session read failed, treating as anonymous: {}", e);
                return None;
            }
        };

        match (access_token, refresh_token, user_json) {
            (None, None, None) => None,
            (Some(access_token), Some(refresh_token), Some(user_json)) => {
                match serde_json::from_str::<Identity>(&user_json) {
                    Ok(identity) => Some(Session {
                        access_token,
                        refresh_token,
                        identity,
                    }),
                    Err(e) => {
                        tracing::warn!("Stored identity is unreadable ({}), clearing session", e);
                        self.heal();
                        None
                    }
                }
            }
            _ => {
                tracing::warn!("Partial session found in storage, clearing it");
                self.heal();
                None
            }
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        match self.load() {
            Some(session) => SessionState::Authenticated(session.identity),
            None => SessionState::Anonymous,
        }
    }

    /// True iff a complete session is stored. Does not validate the token itself.
    pub fn is_authenticated(&self) -> bool {
        self.load().is_some()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.load().map(|s| s.identity)
    }

    pub fn access_token(&self) -> Option<String> {
        self.load().map(|s| s.access_token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.load().map(|s| s.refresh_token)
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key)
    }

    fn heal(&self) {
        if let Err(e) = self.clear() {
            tracing::warn!("Failed to clear corrupt session: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::identity::Role;
    use crate::core::session::storage::MemoryStorage;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn identity(role: Role) -> Identity {
        Identity {
            id: Some(1),
            full_name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            role,
        }
    }

    fn store() -> SessionStore<MemoryStorage> {
        SessionStore::new(MemoryStorage::new())
    }

    /// Memory storage whose writes to one key can be made to fail, and whose
    /// reads of that key fail while `failing_reads` is above zero
    #[derive(Clone, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_key: Option<&'static str>,
        armed: Arc<AtomicBool>,
        failing_reads: Arc<AtomicUsize>,
    }

    impl KeyValueStorage for FlakyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_key == Some(key)
                && self
                    .failing_reads
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok()
            {
                return Err(StorageError::Read {
                    key: key.to_string(),
                    reason: "SecurityError".to_string(),
                });
            }
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.armed.load(Ordering::SeqCst) && self.fail_key == Some(key) {
                return Err(StorageError::Write {
                    key: key.to_string(),
                    reason: "QuotaExceededError".to_string(),
                });
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key)
        }
    }

    // ========================================================================
    // Save / Load
    // ========================================================================

    #[test]
    fn test_save_then_load() {
        let store = store();
        let id = identity(Role::Student);
        store.save("a1", "r1", &id).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.current_identity(), Some(id.clone()));
        assert_eq!(store.access_token(), Some("a1".to_string()));
        assert_eq!(store.refresh_token(), Some("r1".to_string()));
        assert_eq!(store.state(), SessionState::Authenticated(id));
    }

    #[test]
    fn test_empty_store_is_anonymous() {
        let store = store();
        assert!(!store.is_authenticated());
        assert_eq!(store.current_identity(), None);
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_persisted_layout() {
        let store = store();
        store.save("a1", "r1", &identity(Role::Admin)).unwrap();

        let storage = store.storage();
        assert_eq!(storage.get_item("access_token").unwrap(), Some("a1".to_string()));
        assert_eq!(storage.get_item("refresh_token").unwrap(), Some("r1".to_string()));
        let user: serde_json::Value =
            serde_json::from_str(&storage.get_item("user").unwrap().unwrap()).unwrap();
        assert_eq!(user["full_name"], "Grace Hopper");
        assert_eq!(user["role"], "admin");
    }

    #[test]
    fn test_session_survives_new_store_instance() {
        let storage = MemoryStorage::new();
        SessionStore::new(storage.clone())
            .save("a1", "r1", &identity(Role::Student))
            .unwrap();

        // Simulates a page reload: fresh store over the same backend
        let reloaded = SessionStore::new(storage);
        assert!(reloaded.is_authenticated());
    }

    #[test]
    fn test_save_replaces_previous_session() {
        let store = store();
        store.save("a1", "r1", &identity(Role::Student)).unwrap();
        store.save("a2", "r2", &identity(Role::Admin)).unwrap();
        assert_eq!(store.access_token(), Some("a2".to_string()));
        assert_eq!(store.current_identity().unwrap().role, Role::Admin);
    }

    // ========================================================================
    // Clear
    // ========================================================================

    #[test]
    fn test_clear_is_idempotent() {
        let store = store();
        store.save("a1", "r1", &identity(Role::Student)).unwrap();

        store.clear().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.storage().is_empty());

        store.clear().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_save_clear_sequences() {
        let store = store();
        let ops = [true, true, false, true, false, false, true];
        for save in ops {
            if save {
                store.save("a", "r", &identity(Role::Student)).unwrap();
            } else {
                store.clear().unwrap();
            }
            assert_eq!(store.is_authenticated(), save);
        }
    }

    // ========================================================================
    // Self-healing
    // ========================================================================

    #[test]
    fn test_partial_session_is_cleared_on_read() {
        let storage = MemoryStorage::new();
        storage.set_item(ACCESS_TOKEN_KEY, "orphan").unwrap();
        let store = SessionStore::new(storage.clone());

        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_missing_access_token_is_cleared_on_read() {
        let storage = MemoryStorage::new();
        storage.set_item(REFRESH_TOKEN_KEY, "r").unwrap();
        storage
            .set_item(USER_KEY, r#"{"full_name":"x","email":"x@y.z","role":"student"}"#)
            .unwrap();
        let store = SessionStore::new(storage.clone());

        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_unknown_role_is_cleared_on_read() {
        let storage = MemoryStorage::new();
        storage.set_item(ACCESS_TOKEN_KEY, "a").unwrap();
        storage.set_item(REFRESH_TOKEN_KEY, "r").unwrap();
        storage
            .set_item(USER_KEY, r#"{"full_name":"x","email":"x@y.z","role":"root"}"#)
            .unwrap();
        let store = SessionStore::new(storage.clone());

        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_garbage_user_json_is_cleared_on_read() {
        let storage = MemoryStorage::new();
        storage.set_item(ACCESS_TOKEN_KEY, "a").unwrap();
        storage.set_item(REFRESH_TOKEN_KEY, "r").unwrap();
        storage.set_item(USER_KEY, "not json").unwrap();
        let store = SessionStore::new(storage.clone());

        assert_eq!(store.current_identity(), None);
        assert!(storage.is_empty());
    }

    // ========================================================================
    // Updates
    // ========================================================================

    #[test]
    fn test_update_access_token_keeps_refresh_and_identity() {
        let store = store();
        let id = identity(Role::Instructor);
        store.save("old", "r1", &id).unwrap();

        assert!(store.update_access_token("new").unwrap());
        assert_eq!(store.access_token(), Some("new".to_string()));
        assert_eq!(store.refresh_token(), Some("r1".to_string()));
        assert_eq!(store.current_identity(), Some(id));
    }

    #[test]
    fn test_update_access_token_without_session_writes_nothing() {
        let store = store();
        assert!(!store.update_access_token("new").unwrap());
        assert!(store.storage().is_empty());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_update_identity() {
        let store = store();
        store.save("a", "r", &identity(Role::Student)).unwrap();

        let updated = store
            .update_identity(ProfileUpdate {
                full_name: "Grace B. Hopper".to_string(),
                email: "gbh@example.com".to_string(),
            })
            .unwrap()
            .unwrap();

        assert_eq!(updated.full_name, "Grace B. Hopper");
        assert_eq!(updated.role, Role::Student);
        assert_eq!(store.current_identity(), Some(updated));
        assert_eq!(store.access_token(), Some("a".to_string()));
    }

    #[test]
    fn test_update_identity_when_anonymous() {
        let store = store();
        let result = store
            .update_identity(ProfileUpdate {
                full_name: "x".to_string(),
                email: "x@example.com".to_string(),
            })
            .unwrap();
        assert_eq!(result, None);
        assert!(store.storage().is_empty());
    }

    // ========================================================================
    // Write failures
    // ========================================================================

    #[test]
    fn test_failed_save_rolls_back() {
        let flaky = FlakyStorage {
            fail_key: Some(ACCESS_TOKEN_KEY),
            ..Default::default()
        };
        flaky.armed.store(true, Ordering::SeqCst);
        let store = SessionStore::new(flaky.clone());

        let err = store.save("a", "r", &identity(Role::Student)).unwrap_err();
        assert!(matches!(err, StorageError::Write { ref key, .. } if key == ACCESS_TOKEN_KEY));
        assert!(!store.is_authenticated());
        assert!(flaky.inner.is_empty());
    }

    #[test]
    fn test_failed_save_does_not_keep_previous_session() {
        let flaky = FlakyStorage {
            fail_key: Some(REFRESH_TOKEN_KEY),
            ..Default::default()
        };
        let store = SessionStore::new(flaky.clone());
        store.save("a1", "r1", &identity(Role::Student)).unwrap();

        flaky.armed.store(true, Ordering::SeqCst);
        assert!(store.save("a2", "r2", &identity(Role::Admin)).is_err());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_failed_access_token_update_is_reported() {
        let flaky = FlakyStorage {
            fail_key: Some(ACCESS_TOKEN_KEY),
            ..Default::default()
        };
        let store = SessionStore::new(flaky.clone());
        store.save("a1", "r1", &identity(Role::Student)).unwrap();

        flaky.armed.store(true, Ordering::SeqCst);
        assert!(store.update_access_token("a2").is_err());
    }

    // ========================================================================
    // Read failures
    // ========================================================================

    #[test]
    fn test_failed_read_is_anonymous_without_clearing() {
        let flaky = FlakyStorage {
            fail_key: Some(USER_KEY),
            ..Default::default()
        };
        let store = SessionStore::new(flaky.clone());
        let id = identity(Role::Instructor);
        store.save("a1", "r1", &id).unwrap();

        flaky.failing_reads.store(1, Ordering::SeqCst);
        assert_eq!(store.state(), SessionState::Anonymous);
        assert_eq!(flaky.inner.len(), 3);

        // Reads recovered: the stored session is intact
        assert!(store.is_authenticated());
        assert_eq!(store.current_identity(), Some(id));
        assert_eq!(store.access_token(), Some("a1".to_string()));
    }

    #[test]
    fn test_failed_read_blocks_access_token_update() {
        let flaky = FlakyStorage {
            fail_key: Some(REFRESH_TOKEN_KEY),
            ..Default::default()
        };
        let store = SessionStore::new(flaky.clone());
        store.save("a1", "r1", &identity(Role::Student)).unwrap();

        flaky.failing_reads.store(1, Ordering::SeqCst);
        assert!(!store.update_access_token("a2").unwrap());
        assert_eq!(store.access_token(), Some("a1".to_string()));
    }
}
