//! Typed JSON access on top of a raw store

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::store::{KeyValueStore, StoreError};

/// Serializes values to JSON under string keys.
///
/// Loads never fail: a missing key, an unreadable store or a value that no
/// longer parses all come back as "absent".
#[derive(Debug, Clone)]
pub struct Gateway<S> {
    store: S,
}

impl<S: KeyValueStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }

    /// Load the value under `key`, or `None` if absent or corrupt
    pub fn load_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("Failed to read {key:?}: {err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("Ignoring corrupt value under {key:?}: {err}");
                None
            }
        }
    }

    /// Load the value under `key`, or `default` if absent or corrupt
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.load_opt(key).unwrap_or(default)
    }

    /// Whether anything is stored under `key` (parseable or not)
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.store.get(key), Ok(Some(_)))
    }

    /// Remove `key`
    pub fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.store.remove(key)
    }
}
