//! In-memory storage, used by tests and headless tooling.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{ClientStorage, StorageError};

/// A `ClientStorage` backed by a process-local map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.read("k"), None);

        storage.write("k", "v").unwrap();
        assert_eq!(storage.read("k").as_deref(), Some("v"));

        storage.write("k", "v2").unwrap();
        assert_eq!(storage.read("k").as_deref(), Some("v2"));

        storage.remove("k").unwrap();
        assert_eq!(storage.read("k"), None);
    }
}
