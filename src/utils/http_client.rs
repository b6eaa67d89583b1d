use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::errors::{AppError, AppResult, LookupError, LookupResult};

/// Minimal HTTP surface the pictogram client depends on
///
/// Every non-2xx status, transport failure or undecodable body is reported as
/// a [`LookupError`] so callers can pick a fallback without inspecting
/// reqwest internals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET the URL and decode the body as JSON
    async fn get_json(&self, url: &str) -> LookupResult<Value>;
}

/// Default implementation of HttpClient using reqwest
#[derive(Clone)]
pub struct StandardHttpClient {
    client: Client,
}

impl StandardHttpClient {
    /// Create new HTTP client with only a connection timeout (no total request timeout)
    pub fn new(connect_timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for StandardHttpClient {
    async fn get_json(&self, url: &str) -> LookupResult<Value> {
        debug!("Fetching JSON content from: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::transport(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::status(status.as_u16(), url));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LookupError::transport(url, format!("Failed to read response: {e}")))?;

        debug!("Fetched {} bytes from {}", bytes.len(), url);

        serde_json::from_slice(&bytes)
            .map_err(|e| LookupError::decode(url, format!("Failed to parse JSON: {e}")))
    }
}
