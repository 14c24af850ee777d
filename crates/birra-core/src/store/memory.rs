//! In-memory session store.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::StorageError;
use crate::traits::{AUTH_TOKENS_KEY, AUTH_USER_KEY, SessionStore};
use crate::{Credentials, Result, TokenPair};

/// A session store that lives for the duration of the process.
///
/// Entries are kept JSON-encoded under the same keys the persisted stores
/// use, so a value round-trips through the same encoding in tests as it
/// does on disk.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token pair.
    pub fn with_tokens(pair: &TokenPair) -> Result<Self> {
        let store = Self::new();
        store.set(pair)?;
        Ok(store)
    }

    /// Returns the raw encoded entry under `key`.
    pub fn raw(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.raw(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(value))
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|e| StorageError::Corrupt {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), raw);
        Ok(())
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<TokenPair>> {
        self.read(AUTH_TOKENS_KEY)
    }

    fn set(&self, pair: &TokenPair) -> Result<()> {
        self.write(AUTH_TOKENS_KEY, pair)
    }

    fn credentials(&self) -> Result<Option<Credentials>> {
        self.read(AUTH_USER_KEY)
    }

    fn set_credentials(&self, credentials: &Credentials) -> Result<()> {
        self.write(AUTH_USER_KEY, credentials)
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(AUTH_TOKENS_KEY);
        entries.remove(AUTH_USER_KEY);
        debug!("Cleared in-memory session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_is_unauthenticated() {
        let store = MemorySessionStore::new();
        assert!(store.get().unwrap().is_none());
        assert!(!store.is_authenticated().unwrap());
    }

    #[test]
    fn set_overwrites_pair() {
        let store = MemorySessionStore::with_tokens(&TokenPair::new("A1", "R1")).unwrap();
        store.set(&TokenPair::new("A2", "R2")).unwrap();
        assert_eq!(store.get().unwrap(), Some(TokenPair::new("A2", "R2")));
    }

    #[test]
    fn entries_are_json_under_known_keys() {
        let store = MemorySessionStore::new();
        store.set(&TokenPair::new("A1", "R1")).unwrap();
        store
            .set_credentials(&Credentials::new("alice", "secret"))
            .unwrap();

        let tokens: serde_json::Value =
            serde_json::from_str(&store.raw(AUTH_TOKENS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(tokens, serde_json::json!({"access": "A1", "refresh": "R1"}));

        let user: serde_json::Value =
            serde_json::from_str(&store.raw(AUTH_USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(
            user,
            serde_json::json!({"username": "alice", "password": "secret"})
        );
    }

    #[test]
    fn clear_removes_both_entries_and_is_idempotent() {
        let store = MemorySessionStore::with_tokens(&TokenPair::new("A1", "R1")).unwrap();
        store
            .set_credentials(&Credentials::new("alice", "secret"))
            .unwrap();

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        assert!(store.credentials().unwrap().is_none());

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        assert!(store.raw(AUTH_TOKENS_KEY).unwrap().is_none());
        assert!(store.raw(AUTH_USER_KEY).unwrap().is_none());
    }

    #[test]
    fn credentials_without_tokens_are_not_a_session() {
        let store = MemorySessionStore::new();
        store
            .set_credentials(&Credentials::new("alice", "secret"))
            .unwrap();
        assert!(!store.is_authenticated().unwrap());
    }
}
