//! Regional address resolver.
//!
//! A four-level cascading lookup (province -> regency -> district ->
//! village) against an external geographic directory service. The
//! [`RegionalDirectory`] trait is the seam: [`RegionalClient`] is the real
//! HTTP implementation, tests substitute an in-memory directory.
//!
//! The client makes a single attempt per lookup; there is no retry policy.
//! Responses are read as text first so parse failures can be logged with
//! the offending body. Lists are cached with a 5-minute TTL - the directory
//! data is effectively static.

mod cascade;
mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::RegionalConfig;

pub use cascade::RegionCascade;
pub use types::{District, Province, Regency, Village};

/// Errors from the geographic directory service.
#[derive(Debug, Error)]
pub enum RegionalError {
    /// The request could not be sent or the transport failed.
    #[error("regional directory request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("regional directory returned HTTP {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape.
    #[error("failed to parse regional directory response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only lookup into the regional hierarchy.
///
/// Every method is keyed by the parent level's ID; callers must not invoke a
/// child lookup before its parent ID is known.
pub trait RegionalDirectory {
    /// All provinces.
    fn provinces(&self) -> impl Future<Output = Result<Vec<Province>, RegionalError>> + Send;

    /// Regencies within a province.
    fn regencies(
        &self,
        province_id: &str,
    ) -> impl Future<Output = Result<Vec<Regency>, RegionalError>> + Send;

    /// Districts within a regency.
    fn districts(
        &self,
        regency_id: &str,
    ) -> impl Future<Output = Result<Vec<District>, RegionalError>> + Send;

    /// Villages within a district.
    fn villages(
        &self,
        district_id: &str,
    ) -> impl Future<Output = Result<Vec<Village>, RegionalError>> + Send;
}

// =============================================================================
// RegionalClient
// =============================================================================

/// Cache keys for directory lists.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Provinces,
    Regencies(String),
    Districts(String),
    Villages(String),
}

/// Cached list values.
#[derive(Debug, Clone)]
enum CacheValue {
    Provinces(Vec<Province>),
    Regencies(Vec<Regency>),
    Districts(Vec<District>),
    Villages(Vec<Village>),
}

/// HTTP client for the geographic directory service.
///
/// Cheaply cloneable; lists are cached for 5 minutes.
#[derive(Debug, Clone)]
pub struct RegionalClient {
    inner: Arc<RegionalClientInner>,
}

#[derive(Debug)]
struct RegionalClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl RegionalClient {
    /// Create a new directory client.
    #[must_use]
    pub fn new(config: &RegionalConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(512)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(RegionalClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// Fetch and decode one directory list.
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, RegionalError> {
        let url = format!("{}/{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                %url,
                status = status.as_u16(),
                body = %body.chars().take(200).collect::<String>(),
                "Regional directory returned non-success status"
            );
            return Err(RegionalError::Status(status.as_u16()));
        }

        match serde_json::from_str(&body) {
            Ok(list) => Ok(list),
            Err(e) => {
                tracing::warn!(
                    %url,
                    error = %e,
                    body = %body.chars().take(200).collect::<String>(),
                    "Failed to parse regional directory response"
                );
                Err(RegionalError::Parse(e))
            }
        }
    }
}

impl RegionalDirectory for RegionalClient {
    #[instrument(skip(self))]
    async fn provinces(&self) -> Result<Vec<Province>, RegionalError> {
        if let Some(CacheValue::Provinces(list)) = self.inner.cache.get(&CacheKey::Provinces).await
        {
            debug!("provinces cache hit");
            return Ok(list);
        }
        let list: Vec<Province> = self.fetch("provinces.json").await?;
        self.inner
            .cache
            .insert(CacheKey::Provinces, CacheValue::Provinces(list.clone()))
            .await;
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn regencies(&self, province_id: &str) -> Result<Vec<Regency>, RegionalError> {
        let key = CacheKey::Regencies(province_id.to_string());
        if let Some(CacheValue::Regencies(list)) = self.inner.cache.get(&key).await {
            debug!("regencies cache hit");
            return Ok(list);
        }
        let list: Vec<Regency> = self.fetch(&format!("regencies/{province_id}.json")).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Regencies(list.clone()))
            .await;
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn districts(&self, regency_id: &str) -> Result<Vec<District>, RegionalError> {
        let key = CacheKey::Districts(regency_id.to_string());
        if let Some(CacheValue::Districts(list)) = self.inner.cache.get(&key).await {
            debug!("districts cache hit");
            return Ok(list);
        }
        let list: Vec<District> = self.fetch(&format!("districts/{regency_id}.json")).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Districts(list.clone()))
            .await;
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn villages(&self, district_id: &str) -> Result<Vec<Village>, RegionalError> {
        let key = CacheKey::Villages(district_id.to_string());
        if let Some(CacheValue::Villages(list)) = self.inner.cache.get(&key).await {
            debug!("villages cache hit");
            return Ok(list);
        }
        let list: Vec<Village> = self.fetch(&format!("villages/{district_id}.json")).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Villages(list.clone()))
            .await;
        Ok(list)
    }
}
