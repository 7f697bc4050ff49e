//! Local key-value storage port.
//!
//! Identity state is persisted through the [`KeyValueStore`] trait so the
//! backing store can be swapped: [`MemoryStorage`] for tests and embedding,
//! [`FileStorage`] for the CLI, where a JSON file plays the part of browser
//! local storage.
//!
//! Values are opaque strings. The typed helpers [`load_json`] and
//! [`save_json`] layer `serde_json` on top and treat unparseable data as
//! absent.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialised.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A string key-value store with local-storage semantics.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and deserialise the value under `key`.
///
/// Missing keys, unreadable backends and malformed JSON all come back as
/// `None`; the latter two are logged at `warn`.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding unparseable stored value");
            None
        }
    }
}

/// Serialise `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if serialisation or the backend write fails.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_json_missing_key() {
        let store = MemoryStorage::new();
        assert_eq!(load_json::<Vec<String>>(&store, "nothing"), None);
    }

    #[test]
    fn test_load_json_malformed_is_none() {
        let mut store = MemoryStorage::new();
        store.set("larq_users", "{not json").unwrap();
        assert_eq!(load_json::<Vec<String>>(&store, "larq_users"), None);
    }

    #[test]
    fn test_load_json_wrong_shape_is_none() {
        let mut store = MemoryStorage::new();
        store.set("larq_users", r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(load_json::<Vec<String>>(&store, "larq_users"), None);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStorage::new();
        save_json(&mut store, "k", &vec!["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(r#"["a","b"]"#));
        assert_eq!(
            load_json::<Vec<String>>(&store, "k"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut store = MemoryStorage::new();
        {
            let mut borrowed = &mut store;
            KeyValueStore::set(&mut borrowed, "k", "v").unwrap();
        }
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
