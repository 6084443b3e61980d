//! HTTP transport shared by every catalog
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry on transport failures and 429 (max 3 retries)
//! - Status mapping onto `CatalogError`
//!
//! Payloads are never retried: a body that arrives but does not parse is
//! reported as `CatalogError::Malformed` straight away.

use crate::error::CatalogError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("dockbump/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                CatalogError::unavailable("HTTP client", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request, retrying transport failures
    ///
    /// `catalog` names the source in error messages.
    pub async fn get(&self, url: &str, catalog: &str) -> Result<reqwest::Response, CatalogError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(url, attempt, "retrying catalog request");
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay *= 2;
            }

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(CatalogError::unavailable(catalog, "rate limit exceeded"));
                        continue;
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(CatalogError::NotFound {
                            catalog: catalog.to_string(),
                            url: url.to_string(),
                        });
                    }
                    if !status.is_success() {
                        return Err(CatalogError::unavailable(catalog, format!("HTTP {}", status)));
                    }
                    return Ok(response);
                }
                Err(e) if e.is_timeout() => {
                    last_error = Some(CatalogError::timeout(catalog));
                }
                Err(e) => {
                    last_error = Some(CatalogError::unavailable(catalog, e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CatalogError::unavailable(catalog, "unknown error")))
    }

    /// Perform a GET request and return the body as text
    pub async fn get_text(&self, url: &str, catalog: &str) -> Result<String, CatalogError> {
        let response = self.get(url, catalog).await?;
        response
            .text()
            .await
            .map_err(|e| CatalogError::unavailable(catalog, format!("failed to read body: {}", e)))
    }

    /// Perform a GET request and parse the body as JSON
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, catalog: &str) -> Result<T, CatalogError> {
        let body = self.get_text(url, catalog).await?;
        serde_json::from_str(&body)
            .map_err(|e| CatalogError::malformed(catalog, format!("failed to parse JSON: {}", e)))
    }
}
