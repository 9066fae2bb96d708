//! Flat key/value persistence
//!
//! Settings and stats are stored as JSON strings under fixed keys.
//! - `MemoryStore`: in-process map (native runs, tests)
//! - `LocalStore`: browser LocalStorage (wasm32 only)
//!
//! Failures here are reported to the caller and never reach the simulation.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("storage write rejected for key {0}")]
    WriteFailed(String),
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Read a JSON value, treating a missing or unparsable entry as absent
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding corrupt {}: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{KeyValueStore, StoreError};

    /// `window.localStorage`, or nothing if the browser denies it
    pub struct LocalStore {
        storage: Option<web_sys::Storage>,
    }

    impl Default for LocalStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl LocalStore {
        pub fn new() -> Self {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten();
            if storage.is_none() {
                log::warn!("LocalStorage unavailable - settings will not persist");
            }
            Self { storage }
        }
    }

    impl KeyValueStore for LocalStore {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.as_ref()?.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|_| StoreError::WriteFailed(key.to_string()))
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
            storage
                .remove_item(key)
                .map_err(|_| StoreError::WriteFailed(key.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_corrupt_json_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set("stats", "{not json").unwrap();
        assert_eq!(load_json::<Vec<u32>>(&store, "stats"), None);
    }
}
