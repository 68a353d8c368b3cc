//! HTTP access to remote catalogs and template refs.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Blocking HTTP client for catalog and template-ref fetching.
///
/// One client is built per fetcher with a fixed timeout; no timeout is
/// modeled beyond that, so callers bound overall sync duration by
/// choosing it.
pub struct CatalogHttp {
    client: Client,
    timeout: Duration,
}

impl CatalogHttp {
    /// Create a new fetcher with default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("element-templates")
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            timeout,
        }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a URL and return the raw body.
    pub fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        response
            .text()
            .with_context(|| format!("Failed to read response from {}", url))
    }

    /// Fetch a URL and deserialize the JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_text(url)?;
        serde_json::from_str(&body).with_context(|| format!("Invalid JSON from {}", url))
    }
}

impl Default for CatalogHttp {
    fn default() -> Self {
        Self::new()
    }
}
