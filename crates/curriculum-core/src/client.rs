//! HTTP client with a politeness delay for catalog pages
//!
//! This module provides a throttled HTTP client. Every request waits until at
//! least the configured delay has passed since the previous request started.
//! Failed requests are not retried.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};

use crate::error::{CatalogError, Result};

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header for Italian content
const DEFAULT_ACCEPT_LANGUAGE: &str = "it-IT,it;q=0.9,en;q=0.8";

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart.
/// The limiter is shared by all in-flight course fetches, so raising the
/// concurrency never raises the request rate.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with a fixed delay between requests
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use curriculum_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(Duration::from_secs(1));
    /// assert_eq!(limiter.min_interval(), Duration::from_secs(1));
    /// ```
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Acquire permission to make a request
    ///
    /// The first call never waits.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for the catalog HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Fixed delay between requests in milliseconds (default: 1000)
    pub request_delay_ms: u64,
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client for catalog pages with request throttling
pub struct CatalogClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Rate limiter for request throttling
    rate_limiter: RateLimiter,
}

impl CatalogClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let rate_limiter = RateLimiter::new(Duration::from_millis(config.request_delay_ms));

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Fetch HTML content from an absolute URL
    ///
    /// # Errors
    /// - `CatalogError::Http` - Network error or timeout
    /// - `CatalogError::NotFound` - Server returned 404
    /// - `CatalogError::Status` - Server returned any other non-2xx status
    pub async fn fetch(&self, url: &str) -> Result<String> {
        self.rate_limiter.acquire().await;

        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.text().await?);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.to_string()));
        }

        Err(CatalogError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }

    /// Get a reference to the rate limiter (for testing)
    #[cfg(test)]
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}
