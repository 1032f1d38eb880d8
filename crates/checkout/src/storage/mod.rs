//! Client-side storage abstraction.
//!
//! Cart contents, the saved shipping address, and the checkout selection all
//! live in storage that is local to one browsing session. Everything goes
//! through the [`ClientStorage`] trait so the medium can be swapped (file
//! per key on disk, in-memory for tests, a real backend later) without
//! touching callers.
//!
//! Reads are infallible from the caller's perspective: missing or corrupt
//! data is treated as absence, never as an error.

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage keys for persisted client state.
pub mod keys {
    /// Key for the cart line items (array of `CartLineItem`).
    pub const CART: &str = "cart";

    /// Key for the saved shipping address.
    pub const USER_ADDRESS: &str = "userAddress";

    /// Key for the line IDs selected at the cart -> checkout handoff.
    pub const CHECKOUT_ITEMS: &str = "checkoutItems";
}

/// Error writing to or removing from client storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying medium failed to persist the value.
    #[error("failed to persist key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized.
    #[error("failed to serialize key {key:?}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A process-global mutable key/value store, `localStorage`-style.
///
/// Methods take `&self`: the medium itself is shared and interior-mutable,
/// and mutations are atomic with respect to the single-threaded event flow
/// driving them.
pub trait ClientStorage {
    /// Read the raw value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium fails to persist the value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium fails.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: ClientStorage + ?Sized> ClientStorage for &T {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<T: ClientStorage + ?Sized> ClientStorage for Arc<T> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and deserialize the JSON value stored under `key`.
///
/// Corrupt or unparseable data is logged and treated as absent.
pub fn read_json<S: ClientStorage, T: DeserializeOwned>(storage: &S, key: &str) -> Option<T> {
    let raw = storage.read(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding corrupt persisted data");
            None
        }
    }
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns [`StorageError`] if serialization or the write fails.
pub fn write_json<S: ClientStorage, T: Serialize>(
    storage: &S,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.write(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_json_missing_key_is_none() {
        let storage = MemoryStorage::new();
        let value: Option<Vec<u32>> = read_json(&storage, keys::CART);
        assert!(value.is_none());
    }

    #[test]
    fn test_read_json_corrupt_data_is_none() {
        let storage = MemoryStorage::new();
        storage.write(keys::CART, "{not json").unwrap();
        let value: Option<Vec<u32>> = read_json(&storage, keys::CART);
        assert!(value.is_none());
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let storage = MemoryStorage::new();
        write_json(&storage, keys::CHECKOUT_ITEMS, &vec![1, 2, 3]).unwrap();
        let value: Option<Vec<u32>> = read_json(&storage, keys::CHECKOUT_ITEMS);
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let storage = MemoryStorage::new();
        storage.remove("never-written").unwrap();
    }
}
