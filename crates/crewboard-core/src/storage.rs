//! Key-value persistence contract.
//!
//! Every collection the stores own lives under its own stable key. Values are
//! JSON text, the same shape the dashboard keeps in browser local storage, so
//! data carries over between front ends.

use crate::error::{CrewError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Mutex;

/// Stable persistence keys. Renaming any of these orphans existing data.
pub mod keys {
    /// Video engineers (`[Entity]`).
    pub const ENGINEERS: &str = "cat_people_ve";
    /// Social-media managers (`[Entity]`).
    pub const SMM: &str = "cat_people_smm";
    /// Leadership role table (`[LeadershipRole]`).
    pub const LEADERSHIP: &str = "cat_leadership";
    /// Publication accounts (`[Entity]`).
    pub const ACCOUNTS: &str = "cat_accounts";
    /// SMM id to account ids (`{smmId: [accountId]}`).
    pub const SMM_LINKS: &str = "smm_links";
    /// Current session identity (`Identity | null`).
    pub const AUTH_USER: &str = "auth_user";
    /// Admin password (JSON string).
    pub const AUTH_PASS: &str = "auth_pass";

    /// Every key the stores own. `CatalogStore::flush` writes the first five,
    /// `SessionStore::flush` the last two.
    pub const ALL: [&str; 7] = [ENGINEERS, SMM, LEADERSHIP, ACCOUNTS, SMM_LINKS, AUTH_USER, AUTH_PASS];
}

/// An abstract key-value store holding opaque text blobs.
///
/// This trait decouples the stores from the storage mechanism (in-memory map,
/// one file per key, browser local storage behind a bridge).
///
/// Implementations must make `set` visible to a later `get` on the same
/// instance and, for durable backends, on a fresh instance over the same data.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value under `key`, `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Loads and parses `key`, falling back to `default` when the key is absent,
/// unreadable or does not parse.
///
/// A corrupted value is never partially recovered: the whole collection is
/// replaced by the default dataset.
pub fn load_or_default<T, F>(store: &dyn KeyValueStore, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                tracing::debug!(key, "loaded persisted value");
                value
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "persisted value is malformed, using defaults");
                default()
            }
        },
        Ok(None) => {
            tracing::debug!(key, "no persisted value, using defaults");
            default()
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read persisted value, using defaults");
            default()
        }
    }
}

/// Serializes `value` as JSON and writes it under `key`.
pub fn save<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)?;
    tracing::debug!(key, bytes = raw.len(), "persisted value");
    Ok(())
}

/// In-memory store, used for tests and as a scratch backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| CrewError::internal(format!("memory store lock poisoned: {}", e)))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get(keys::AUTH_PASS).unwrap().is_none());

        store.set(keys::AUTH_PASS, "\"secret\"").unwrap();
        assert_eq!(store.get(keys::AUTH_PASS).unwrap().as_deref(), Some("\"secret\""));
        assert_eq!(store.len(), 1);

        store.remove(keys::AUTH_PASS).unwrap();
        store.remove(keys::AUTH_PASS).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_or_default_missing_key() {
        let store = MemoryStore::new();
        let value: Vec<String> = load_or_default(&store, keys::ACCOUNTS, || vec!["АПН".to_string()]);
        assert_eq!(value, vec!["АПН".to_string()]);
    }

    #[test]
    fn test_load_or_default_malformed_value() {
        let store = MemoryStore::new();
        store.set(keys::ACCOUNTS, "{not json").unwrap();
        let value: Vec<String> = load_or_default(&store, keys::ACCOUNTS, Vec::new);
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save(&store, keys::SMM_LINKS, &vec!["Прообраз", "Антиаборт"]).unwrap();
        let value: Vec<String> = load_or_default(&store, keys::SMM_LINKS, Vec::new);
        assert_eq!(value, vec!["Прообраз", "Антиаборт"]);
    }

    #[test]
    fn test_keys_are_distinct() {
        let mut all = keys::ALL.to_vec();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), keys::ALL.len());
    }
}
