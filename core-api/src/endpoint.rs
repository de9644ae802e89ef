//! Endpoint description and request construction
//!
//! `RequestBuilder` turns a logical [`Endpoint`] into a transport-ready
//! [`HttpRequest`]. It is pure: the same inputs always produce the same
//! request.

use std::time::Duration;

use bridge_traits::http::{HttpMethod, HttpRequest};
use url::Url;

use crate::error::{ApiError, Result};

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A logical API endpoint, relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub method: HttpMethod,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            method,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Get)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_query_items(mut self, items: Vec<(String, String)>) -> Self {
        self.query.extend(items);
        self
    }
}

/// Builds requests against a fixed base URL
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    default_headers: Vec<(String, String)>,
    timeout: Duration,
}

impl RequestBuilder {
    /// Create a builder with `Accept: application/json` and the default timeout.
    ///
    /// Fails with [`ApiError::InvalidUrl`] if `base_url` is not an absolute
    /// URL that can carry a path.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url}: cannot be used as a base URL"
            )));
        }

        Ok(Self {
            base_url,
            default_headers: vec![("Accept".to_string(), "application/json".to_string())],
            timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Add or replace a header sent with every request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.default_headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&key));
        self.default_headers.push((key, value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Compose base URL, endpoint path and query into a request.
    ///
    /// Path segments are appended to the base path, so a base of
    /// `https://host/api` and a path of `character/2` yield
    /// `https://host/api/character/2`. No `?` is emitted for an empty query.
    pub fn build(&self, endpoint: &Endpoint) -> Result<HttpRequest> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::InvalidUrl(format!("{}: cannot append path", self.base_url))
            })?;
            segments
                .pop_if_empty()
                .extend(endpoint.path.split('/').filter(|s| !s.is_empty()));
        }

        url.set_query(None);
        if !endpoint.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                endpoint
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }

        let mut request = HttpRequest::new(endpoint.method, url.to_string()).timeout(self.timeout);
        for (key, value) in &self.default_headers {
            request = request.header(key.clone(), value.clone());
        }
        Ok(request)
    }
}
