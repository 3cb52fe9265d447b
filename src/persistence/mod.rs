//! Key-value persistence
//!
//! All saved data (settings, best scores, missions, Daily Tide date) goes
//! through the `Storage` trait as plain string values under fixed keys.
//! - `LocalStorage`: browser LocalStorage (wasm only)
//! - `MemoryStorage`: in-process map for native builds and tests
//!
//! Writes are last-write-wins. There is no schema versioning.

#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Prefix shared by every key this game writes
pub const KEY_PREFIX: &str = "undersea_runner_";

/// Storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage call failed: {0}")]
    Backend(String),
    #[error("stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// String key-value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Lets the driver pick a backend at runtime
impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Read a JSON value, `None` when the key is absent
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    match storage.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Write a value as JSON
pub fn save_json<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_json_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut map = BTreeMap::new();
        map.insert("collect20".to_string(), true);
        save_json(&mut storage, "k", &map).unwrap();

        let loaded: Option<BTreeMap<String, bool>> = load_json(&storage, "k").unwrap();
        assert_eq!(loaded, Some(map));
    }

    #[test]
    fn test_missing_key_is_none() {
        let storage = MemoryStorage::new();
        let loaded: Option<u32> = load_json(&storage, "absent").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_boxed_backend() {
        let mut storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert!(storage.get("k").unwrap().is_none());
    }

    #[test]
    fn test_bad_json_is_error() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "{not json").unwrap();
        let result: Result<Option<u32>> = load_json(&storage, "k");
        assert!(matches!(result, Err(StorageError::Json(_))));
    }
}
