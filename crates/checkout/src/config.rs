//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `NEXU_REGIONAL_API_BASE_URL` - Base URL of the geographic directory
//!   service (default: the public api-wilayah-indonesia mirror)
//! - `NEXU_DATA_DIR` - Directory for client-side persisted state
//!   (default: `.nexu`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default base URL of the Indonesian regional directory service.
pub const DEFAULT_REGIONAL_API_BASE_URL: &str =
    "https://www.emsifa.com/api-wilayah-indonesia/api";

/// Default directory for persisted client state.
pub const DEFAULT_DATA_DIR: &str = ".nexu";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Geographic directory service configuration.
#[derive(Debug, Clone)]
pub struct RegionalConfig {
    /// Base URL, without a trailing slash.
    pub base_url: String,
}

impl Default for RegionalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGIONAL_API_BASE_URL.to_string(),
        }
    }
}

impl RegionalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `NEXU_REGIONAL_API_BASE_URL` is set but is
    /// not a valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = match std::env::var("NEXU_REGIONAL_API_BASE_URL") {
            Ok(value) => {
                Url::parse(&value).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "NEXU_REGIONAL_API_BASE_URL".to_string(),
                        e.to_string(),
                    )
                })?;
                value.trim_end_matches('/').to_string()
            }
            Err(_) => DEFAULT_REGIONAL_API_BASE_URL.to_string(),
        };

        Ok(Self { base_url })
    }
}

/// Client storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON document per storage key.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StorageConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let data_dir = std::env::var("NEXU_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        Self { data_dir }
    }
}
