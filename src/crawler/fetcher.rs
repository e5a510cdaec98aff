//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests to fetch page markup
//! - Classifying failures into values instead of errors
//!
//! There is no retry, no caching, and no redirect override: one call is one
//! outbound request with the transport's default policy.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::state::UnitFailure;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, DNS, reset, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Consumes the result, yielding the body or the failure it maps to
    pub fn into_body(self) -> Result<String, UnitFailure> {
        match self {
            Self::Success { body, .. } => Ok(body),
            Self::HttpError { status_code } => Err(UnitFailure::Http(status_code)),
            Self::NetworkError { error } => Err(UnitFailure::Network(error)),
        }
    }
}

/// Retrieves markup text for a URL
///
/// Implementations must never panic or propagate errors: every failure is
/// reported through [`FetchResult`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches one absolute URL
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Fetcher backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher with a client configured from the crawl settings
    pub fn from_config(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent, crawler)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - The crawler configuration (timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use comic_archiver::config::{CrawlerConfig, UserAgentConfig};
/// use comic_archiver::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx, body read | `Success` |
/// | HTTP non-2xx | `HttpError(code)` |
/// | Timeout / connect / DNS / reset | `NetworkError` |
/// | Body read failure | `NetworkError` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The absolute URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_transport_error(&e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: format!("Failed to read body: {}", e),
        },
    }
}

/// Maps a transport error to a `NetworkError` description
fn classify_transport_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
