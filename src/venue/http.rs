use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::RateLimiter;
use crate::errors::VenueError;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff: `base * 2^attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

/// `Retry-After` in its delay-seconds form. HTTP-date values are ignored.
pub fn parse_retry_after(value: Option<&HeaderValue>) -> Option<Duration> {
    let secs: u64 = value?.to_str().ok()?.trim().parse().ok()?;
    Some(Duration::from_secs(secs))
}

/// JSON GETs behind a rate limiter, with bounded retries.
///
/// - 404 is `Ok(None)`.
/// - 429 waits `Retry-After` (or the backoff) and retries.
/// - 5xx and transport errors back off and retry.
/// - Anything else non-2xx is an error straight away.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(http: Client, limiter: Arc<RateLimiter>) -> Self {
        Self {
            http,
            limiter,
            retry: RetryPolicy::default(),
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, VenueError> {
        self.get_json_with_headers(url, HeaderMap::new()).await
    }

    pub async fn get_json_with_headers<T: DeserializeOwned>(
        &self,
        url: Url,
        headers: HeaderMap,
    ) -> Result<Option<T>, VenueError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0u32;

        loop {
            self.limiter.acquire().await;
            let last_attempt = attempt + 1 >= max_attempts;

            let resp = match self
                .http
                .get(url.clone())
                .header(ACCEPT, "application/json")
                .headers(headers.clone())
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) if !last_attempt => {
                    let wait = self.retry.backoff(attempt);
                    tracing::warn!(error = %e, url = %url, attempt, "Request failed, retrying");
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let status = resp.status();

            if status == StatusCode::NOT_FOUND {
                return Ok(None);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                if last_attempt {
                    return Err(VenueError::RateLimited {
                        url: url.to_string(),
                        attempts: attempt + 1,
                    });
                }
                let wait = parse_retry_after(resp.headers().get(RETRY_AFTER))
                    .unwrap_or_else(|| self.retry.backoff(attempt));
                tracing::warn!(url = %url, wait_secs = wait.as_secs(), "Rate limited by venue");
                tokio::time::sleep(wait).await;
                attempt += 1;
                continue;
            }

            if status.is_server_error() && !last_attempt {
                let wait = self.retry.backoff(attempt);
                tracing::warn!(url = %url, status = status.as_u16(), attempt, "Server error, retrying");
                tokio::time::sleep(wait).await;
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                return Err(VenueError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body: T = resp.json().await?;
            return Ok(Some(body));
        }
    }
}

/// Build `base + path` with query parameters.
pub fn build_url(base: &str, path: &str, params: &[(&str, String)]) -> Result<Url, VenueError> {
    let raw = format!("{}{}", base.trim_end_matches('/'), path);
    let parsed = if params.is_empty() {
        Url::parse(&raw)
    } else {
        Url::parse_with_params(&raw, params)
    };
    parsed.map_err(|e| VenueError::InvalidUrl(format!("{raw}: {e}")))
}
