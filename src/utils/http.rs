// src/utils/http.rs

//! HTTP page fetching.

use std::time::Duration;

use crate::error::Result;
use crate::models::CheckerConfig;

/// Fetches remote content for the pipeline.
///
/// Implementations must treat any non-2xx response as an error.
pub trait PageFetcher {
    /// Fetch a URL and return the body as text.
    fn fetch_text(&self, url: &str) -> Result<String>;

    /// Fetch a URL and return the raw body bytes.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking reqwest-backed fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher configured with the checker's user agent and timeout.
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.text()?)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}
