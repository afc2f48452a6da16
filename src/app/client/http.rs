//! Rate-limited HTTP operations with bounded retry
//!
//! One handler is shared by every request of the process, so the rate limit
//! spans manifest and file fetches alike. Connection errors and the transient
//! 429/503 statuses are retried with exponential backoff; any other
//! non-success status fails immediately.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{clock::DefaultClock, state::InMemoryState, Jitter, Quota, RateLimiter};
use reqwest::Client;
use url::Url;

use crate::constants::limits;
use crate::errors::{DownloadError, DownloadResult};

type DirectRateLimiter = RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>;

/// HTTP operations handler with rate limiting and retry
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    rate_limiter: DirectRateLimiter,
}

impl HttpHandler {
    /// Creates a new handler around an already-built client
    pub fn new(client: Client, rate_limit_rps: NonZeroU32) -> Self {
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate_limit_rps));
        Self {
            client,
            rate_limiter,
        }
    }

    /// Issue a GET and return the response once it carries a success status
    ///
    /// Retries connection errors and HTTP 429/503 up to `limits::MAX_RETRIES`
    /// times with exponential backoff. Other non-2xx statuses are returned as
    /// `DownloadError::ServerError` without retrying.
    pub async fn get(&self, url: &Url) -> DownloadResult<reqwest::Response> {
        let mut attempt = 0;
        loop {
            // Jitter on the limiter wait avoids synchronized request bursts
            self.rate_limiter
                .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
                .await;

            match self.client.get(url.as_str()).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.as_u16() == 429 || status.as_u16() == 503 {
                        if attempt < limits::MAX_RETRIES {
                            attempt += 1;
                            let delay = backoff_delay(attempt);
                            tracing::warn!(
                                "Transient HTTP {} from {}. Backing off for {}ms",
                                status.as_u16(),
                                url,
                                delay.as_millis()
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(match status.as_u16() {
                            429 => DownloadError::RateLimitExceeded,
                            _ => DownloadError::ServerOverloaded,
                        });
                    }

                    if !status.is_success() {
                        return Err(DownloadError::ServerError {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }

                    tracing::debug!("Fetched {} ({})", url, status);
                    return Ok(response);
                }
                Err(e) if attempt < limits::MAX_RETRIES => {
                    attempt += 1;
                    let delay = backoff_delay(attempt);
                    tracing::warn!(
                        "Request to {} failed (attempt {}/{}): {}. Retrying in {}ms",
                        url,
                        attempt,
                        limits::MAX_RETRIES,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!(
                        "Request to {} failed after {} retries: {}",
                        url,
                        limits::MAX_RETRIES,
                        e
                    );
                    return Err(DownloadError::MaxRetriesExceeded {
                        max_retries: limits::MAX_RETRIES,
                        url: url.to_string(),
                    });
                }
            }
        }
    }
}

/// Exponential backoff delay for the given attempt number
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(limits::RETRY_BASE_DELAY_MS * 2_u64.pow(attempt))
}
