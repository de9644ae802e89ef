//! # Catalog Configuration Module
//!
//! Provides configuration management for the character catalog core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `CatalogConfig` holding every bridge and tunable the core needs. It
//! enforces fail-fast validation so a misconfigured host finds out at
//! startup rather than on the first request.
//!
//! ## Required Dependencies
//!
//! - `HttpClient` - Single-shot HTTP transport (desktop default: reqwest)
//! - `FavoritesStore` - Favorites persistence (desktop default: JSON file)
//!
//! When the `desktop-shims` feature is enabled, desktop-ready defaults are
//! injected automatically if not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CatalogConfig;
//! use std::sync::Arc;
//!
//! let config = CatalogConfig::builder()
//!     .http_client(Arc::new(MyHttpClient))
//!     .favorites_store(Arc::new(MyFavoritesStore))
//!     .from_env()?
//!     .build()?;
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable                       | Field             |
//! |--------------------------------|-------------------|
//! | `CATALOG_BASE_URL`             | `base_url`        |
//! | `CATALOG_REQUEST_TIMEOUT_SECS` | `request_timeout` |
//! | `CATALOG_SEARCH_DEBOUNCE_MS`   | `search_debounce` |

use crate::error::{Error, Result};
use crate::logging::redact_if_sensitive;

use bridge_traits::favorites::FavoritesStore;
use bridge_traits::http::{HttpClient, RetryPolicy};
use core_api::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use core_catalog::{RelatedConfig, DEFAULT_SEARCH_DEBOUNCE};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const ENV_BASE_URL: &str = "CATALOG_BASE_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "CATALOG_REQUEST_TIMEOUT_SECS";
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "CATALOG_SEARCH_DEBOUNCE_MS";

/// Everything the catalog core needs from its host.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Root of the REST API, e.g. `https://rickandmortyapi.com/api`
    pub base_url: String,
    /// Per-request deadline at the HTTP layer, independent of backoff
    pub request_timeout: Duration,
    /// Extra headers sent with every request
    pub default_headers: BTreeMap<String, String>,
    pub retry_policy: RetryPolicy,
    pub search_debounce: Duration,
    /// Pages scanned when looking for episode-related characters
    pub related_episode_pages: u32,
    /// Maximum episode-related characters kept
    pub related_episode_limit: usize,
    pub http_client: Arc<dyn HttpClient>,
    pub favorites_store: Arc<dyn FavoritesStore>,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: BTreeMap<&str, String> = self
            .default_headers
            .iter()
            .map(|(key, value)| (key.as_str(), redact_if_sensitive(key, value)))
            .collect();

        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("default_headers", &headers)
            .field("retry_policy", &self.retry_policy)
            .field("search_debounce", &self.search_debounce)
            .field("related_episode_pages", &self.related_episode_pages)
            .field("related_episode_limit", &self.related_episode_limit)
            .field("http_client", &"HttpClient { ... }")
            .field("favorites_store", &"FavoritesStore { ... }")
            .finish()
    }
}

impl CatalogConfig {
    /// Creates a new builder for constructing a `CatalogConfig`.
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Base URL is an absolute URL
    /// - Request timeout is non-zero
    /// - Retry policy allows at least one attempt
    /// - Related-character limits are non-zero
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Base URL '{}' cannot have paths appended",
                self.base_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        if self.retry_policy.max_attempts == 0 {
            return Err(Error::Config(
                "Retry policy must allow at least one attempt".to_string(),
            ));
        }

        if self.related_episode_pages == 0 || self.related_episode_limit == 0 {
            return Err(Error::Config(
                "Related character limits must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required to reach the catalog API. \
                 Desktop: enable the 'desktop-shims' feature to use the default reqwest client. \
                 Mobile: inject a URLSession/OkHttp adapter."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn favorites_store_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "FavoritesStore".to_string(),
        message: "FavoritesStore implementation is required to persist favorites. \
                 Desktop: enable the 'desktop-shims' feature to use the default JSON file store. \
                 Mobile: inject a Core Data/Room adapter."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::with_timeout(timeout)
        .map_err(|e| Error::Internal(format!("Failed to create default HttpClient: {}", e)))?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(_timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

#[cfg(feature = "desktop-shims")]
fn provide_default_favorites_store() -> Result<Arc<dyn FavoritesStore>> {
    use bridge_desktop::JsonFavoritesStore;

    let store = JsonFavoritesStore::in_data_dir();
    debug!(
        file = %crate::logging::strip_path(&store.path().to_string_lossy()),
        "Using default favorites store"
    );
    Ok(Arc::new(store))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_favorites_store() -> Result<Arc<dyn FavoritesStore>> {
    Err(favorites_store_missing_error())
}

/// Builder for constructing [`CatalogConfig`] instances.
#[derive(Default)]
pub struct CatalogConfigBuilder {
    base_url: Option<String>,
    request_timeout: Option<Duration>,
    default_headers: BTreeMap<String, String>,
    retry_policy: Option<RetryPolicy>,
    search_debounce: Option<Duration>,
    related_episode_pages: Option<u32>,
    related_episode_limit: Option<usize>,
    http_client: Option<Arc<dyn HttpClient>>,
    favorites_store: Option<Arc<dyn FavoritesStore>>,
}

impl CatalogConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request. Later values replace earlier ones.
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    pub fn search_debounce(mut self, debounce: Duration) -> Self {
        self.search_debounce = Some(debounce);
        self
    }

    pub fn related_episode_pages(mut self, pages: u32) -> Self {
        self.related_episode_pages = Some(pages);
        self
    }

    pub fn related_episode_limit(mut self, limit: usize) -> Self {
        self.related_episode_limit = Some(limit);
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// Optional when the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the favorites store implementation.
    ///
    /// Optional when the `desktop-shims` feature is enabled.
    pub fn favorites_store(mut self, store: Arc<dyn FavoritesStore>) -> Self {
        self.favorites_store = Some(store);
        self
    }

    /// Applies overrides from the process environment.
    pub fn from_env(self) -> Result<Self> {
        self.from_env_with(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Unset and blank variables are ignored.
    pub fn from_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(url) = read(ENV_BASE_URL) {
            debug!(base_url = %url, "Base URL overridden from environment");
            self.base_url = Some(url);
        }

        if let Some(raw) = read(ENV_REQUEST_TIMEOUT_SECS) {
            let secs = parse_number::<u64>(ENV_REQUEST_TIMEOUT_SECS, &raw)?;
            self.request_timeout = Some(Duration::from_secs(secs));
        }

        if let Some(raw) = read(ENV_SEARCH_DEBOUNCE_MS) {
            let millis = parse_number::<u64>(ENV_SEARCH_DEBOUNCE_MS, &raw)?;
            self.search_debounce = Some(Duration::from_millis(millis));
        }

        Ok(self)
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// - `Error::CapabilityMissing` if a bridge is missing and `desktop-shims`
    ///   is disabled
    /// - `Error::Config` if validation fails
    pub fn build(self) -> Result<CatalogConfig> {
        let request_timeout = self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(request_timeout)?,
        };

        let favorites_store = match self.favorites_store {
            Some(store) => store,
            None => provide_default_favorites_store()?,
        };

        let related = RelatedConfig::default();
        let config = CatalogConfig {
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout,
            default_headers: self.default_headers,
            retry_policy: self.retry_policy.unwrap_or_default(),
            search_debounce: self.search_debounce.unwrap_or(DEFAULT_SEARCH_DEBOUNCE),
            related_episode_pages: self
                .related_episode_pages
                .unwrap_or(related.episode_pages),
            related_episode_limit: self
                .related_episode_limit
                .unwrap_or(related.episode_limit),
            http_client,
            favorites_store,
        };

        config.validate()?;

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| Error::Config(format!("{} must be a non-negative integer, got '{}'", key, raw)))
}
