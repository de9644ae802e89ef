//! HTTP Client Abstraction
//!
//! Single-shot async HTTP transport supplied by the host. Retry, backoff and
//! status classification live in the core so every platform behaves the same.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::Result;

/// HTTP methods the catalog API is called with
///
/// Every catalog endpoint is a read, so only `GET` exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// HTTP request builder
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}

/// HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retry policy configuration
///
/// Rate-limited responses and network failures back off independently:
/// the n-th retry (0-based attempt index) waits `base * 2^attempt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Base delay after a rate-limited response
    pub rate_limit_base_delay: Duration,
    /// Base delay after a failed send
    pub network_base_delay: Duration,
    /// Status codes treated as rate limiting
    pub retry_statuses: Vec<u16>,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    pub fn rate_limit_delay(&self, attempt: u32) -> Duration {
        backoff(self.rate_limit_base_delay, attempt)
    }

    pub fn network_delay(&self, attempt: u32) -> Duration {
        backoff(self.network_base_delay, attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_base_delay: Duration::from_secs(1),
            network_base_delay: Duration::from_millis(500),
            retry_statuses: vec![403, 429],
        }
    }
}

/// `base * 2^attempt`, saturating instead of overflowing for large attempts
fn backoff(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

/// Async HTTP client trait
///
/// Implementations perform exactly one round-trip per call and must not
/// retry on their own. Non-2xx responses are returned as `Ok`; only failures
/// that produced no response are errors:
/// - [`BridgeError::Network`] for connection level failures
/// - [`BridgeError::Timeout`] when the request timeout elapsed
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{HttpClient, HttpRequest, HttpMethod};
///
/// async fn fetch(client: &dyn HttpClient) -> Result<u16> {
///     let request = HttpRequest::new(HttpMethod::Get, "https://rickandmortyapi.com/api/character/1");
///     let response = client.execute(request).await?;
///     Ok(response.status)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}
