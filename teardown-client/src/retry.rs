//! Transport-level retry
//!
//! Retries a single HTTP request when it fails transiently. Connection
//! errors are retried for every method, since nothing reached the server.
//! Timeouts and retryable status codes are retried only for idempotent
//! methods, so a `POST /runs` the server may have accepted is never sent
//! twice.
//!
//! Once retries are exhausted the last response is handed back to the
//! caller unchanged.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::Result;

/// Retry policy for transient failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before retry `n` is `backoff_factor * 2^(n-1)`
    pub backoff_factor: Duration,
    /// Upper bound for a single delay
    pub max_backoff: Duration,
    /// Status codes treated as transient
    pub retry_statuses: Vec<StatusCode>,
}

impl RetryPolicy {
    /// Creates a policy with the default transient status set
    pub fn new(max_retries: u32, backoff_factor: Duration) -> Self {
        Self {
            max_retries,
            backoff_factor,
            ..Self::default()
        }
    }

    /// A policy that sends every request exactly once
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Delay before the given retry (1-based)
    pub fn backoff_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.backoff_factor
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }

    fn retries_status(&self, method: &Method, status: StatusCode) -> bool {
        is_idempotent(method) && self.retry_statuses.contains(&status)
    }

    fn retries_error(&self, method: &Method, error: &reqwest::Error) -> bool {
        error.is_connect() || (error.is_timeout() && is_idempotent(method))
    }

    /// Sends the request, retrying transient failures
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let (client, request) = request.build_split();
        let request = request?;
        let method = request.method().clone();
        let url = request.url().clone();

        let mut retries = 0;

        loop {
            // Requests with streaming bodies cannot be replayed
            let Some(attempt) = request.try_clone() else {
                return Ok(client.execute(request).await?);
            };

            let can_retry = retries < self.max_retries;

            match client.execute(attempt).await {
                Ok(response) if can_retry && self.retries_status(&method, response.status()) => {
                    warn!(
                        "{} {} returned {} (retry {}/{})",
                        method,
                        url,
                        response.status(),
                        retries + 1,
                        self.max_retries
                    );
                }
                Ok(response) => {
                    debug!("{} {} returned {}", method, url, response.status());
                    return Ok(response);
                }
                Err(e) if can_retry && self.retries_error(&method, &e) => {
                    warn!(
                        "{} {} failed: {} (retry {}/{})",
                        method,
                        url,
                        e,
                        retries + 1,
                        self.max_retries
                    );
                }
                Err(e) => return Err(e.into()),
            }

            retries += 1;
            tokio::time::sleep(self.backoff_for(retries)).await;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: Duration::from_millis(300),
            max_backoff: Duration::from_secs(10),
            retry_statuses: vec![
                StatusCode::TOO_MANY_REQUESTS,
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusCode::BAD_GATEWAY,
                StatusCode::SERVICE_UNAVAILABLE,
                StatusCode::GATEWAY_TIMEOUT,
            ],
        }
    }
}

fn is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::PUT | Method::DELETE | Method::OPTIONS | Method::TRACE
    )
}
