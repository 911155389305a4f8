//! HTTP retrieval of the remote HTML resource

use crate::core::{Error, Result};
use std::time::Duration;

/// HTTP fetcher bound to one device URL
///
/// Performs a single GET per call with an explicit timeout. Retries are the
/// scheduler's concern, never the fetcher's.
pub struct Fetcher {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl Fetcher {
    /// Build a fetcher for a validated device URL
    pub fn new(url: reqwest::Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("websensor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    /// Perform one GET and return the raw response body
    ///
    /// Fails with `Error::Fetch` on network failure, timeout, or a non-2xx
    /// status.
    pub async fn retrieve(&self) -> Result<String> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!("HTTP {}", response.status())));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))
    }
}
