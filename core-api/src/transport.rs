//! Retrying transport
//!
//! Wraps the host's single-shot [`HttpClient`] with the rate-limit aware
//! retry policy. The upstream API throttles bursts (fast paging, fast
//! typing) with 429/403, so those statuses and network failures are retried
//! with exponential backoff:
//!
//! | outcome of attempt `n`       | wait before attempt `n + 1`   |
//! |------------------------------|-------------------------------|
//! | status in `retry_statuses`   | `rate_limit_base * 2^n`       |
//! | send failed (no response)    | `network_base * 2^n`          |
//! | any other status             | returned immediately          |
//!
//! Cancellation is checked before every send and raced against every send
//! and every backoff; it is never retried.

use std::sync::Arc;

use bridge_traits::error::BridgeError;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse, RetryPolicy};
use core_async::sync::CancellationToken;
use core_async::time::{run_or_cancel, sleep_or_cancel};
use tracing::{debug, instrument, warn};

use crate::error::{ApiError, Result};

pub struct RetryingTransport {
    http_client: Arc<dyn HttpClient>,
    policy: RetryPolicy,
}

impl RetryingTransport {
    pub fn new(http_client: Arc<dyn HttpClient>, policy: RetryPolicy) -> Self {
        Self {
            http_client,
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send `request`, retrying transient failures.
    ///
    /// Returns the response for any status outside `retry_statuses`,
    /// including 4xx/5xx; status validation is the decoder's job. When every
    /// attempt failed, a network error from any attempt wins over a
    /// rate-limited response, otherwise the last response is returned.
    #[instrument(skip_all, fields(method = request.method.as_str(), url = %request.url))]
    pub async fn send(
        &self,
        request: HttpRequest,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut network_error: Option<ApiError> = None;
        let mut last_response: Option<HttpResponse> = None;

        for attempt in 0..max_attempts {
            if cancel.is_cancelled() {
                debug!(attempt, "Request cancelled before send");
                return Err(ApiError::Cancelled);
            }

            debug!(
                attempt = attempt + 1,
                max_attempts, "Executing HTTP request"
            );

            let outcome = run_or_cancel(self.http_client.execute(request.clone()), cancel)
                .await
                .ok_or(ApiError::Cancelled)?;

            let delay = match outcome {
                Ok(response) if self.policy.should_retry_status(response.status) => {
                    warn!(
                        status = response.status,
                        attempt = attempt + 1,
                        "HTTP request rate limited"
                    );
                    last_response = Some(response);
                    self.policy.rate_limit_delay(attempt)
                }
                Ok(response) => return Ok(response),
                Err(BridgeError::Cancelled) => return Err(ApiError::Cancelled),
                Err(error) => {
                    warn!(error = %error, attempt = attempt + 1, "HTTP request failed");
                    network_error = Some(ApiError::from(error));
                    self.policy.network_delay(attempt)
                }
            };

            if attempt + 1 >= max_attempts {
                break;
            }

            debug!(delay_ms = delay.as_millis() as u64, "Retrying after delay");
            if !sleep_or_cancel(delay, cancel).await {
                return Err(ApiError::Cancelled);
            }
        }

        if let Some(error) = network_error {
            return Err(error);
        }
        last_response.ok_or_else(|| ApiError::Transport("All retry attempts exhausted".to_string()))
    }
}
