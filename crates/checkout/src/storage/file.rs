//! File-backed storage: one JSON document per key under a data directory.

use std::path::{Path, PathBuf};

use super::{ClientStorage, StorageError};
use crate::config::StorageConfig;

/// A `ClientStorage` that persists each key as a file in a directory.
///
/// Keys map to `<data_dir>/<key>.json`. Reads of missing or unreadable files
/// return `None`; only writes and removals surface IO errors.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at the configured data directory, creating it if
    /// it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created.
    pub fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&config.data_dir).map_err(|source| StorageError::Io {
            key: config.data_dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            data_dir: config.data_dir.clone(),
        })
    }

    /// Directory holding the persisted documents.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl ClientStorage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted data");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::write(self.path_for(key), value).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}
