//! Arrivals feed HTTP client.
//!
//! Requests go straight to the feed from the server, so the browser never
//! needs a cross-origin request.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::domain::{Arrivals, StationId};

use super::error::ArrivalsError;
use super::types::ArrivalsResponse;

/// Default base URL for the arrivals feed.
pub const DEFAULT_ARRIVALS_URL: &str = "https://api.wheresthefuckingtrain.com";

/// Longest response body kept in a parse error.
const MAX_ERROR_BODY: usize = 500;

/// Something that can fetch the upcoming arrivals at a station.
pub trait ArrivalsSource {
    fn fetch_arrivals(
        &self,
        id: StationId,
    ) -> impl Future<Output = Result<Arrivals, ArrivalsError>> + Send;
}

/// Configuration for the arrivals client.
#[derive(Debug, Clone)]
pub struct ArrivalsConfig {
    /// Base URL of the feed (defaults to the public feed)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ArrivalsConfig {
    /// Create a config pointing at the public feed.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_ARRIVALS_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ArrivalsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrivals feed client.
#[derive(Debug, Clone)]
pub struct ArrivalsClient {
    http: reqwest::Client,
    base_url: String,
}

impl ArrivalsClient {
    /// Create a new arrivals client with the given configuration.
    pub fn new(config: ArrivalsConfig) -> Result<Self, ArrivalsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the upcoming arrivals for a station.
    pub async fn get_arrivals(&self, id: StationId) -> Result<Arrivals, ArrivalsError> {
        let url = format!("{}/by-id/{}", self.base_url, id);
        debug!(%url, "fetching arrivals");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArrivalsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: ArrivalsResponse =
            serde_json::from_str(&body).map_err(|e| ArrivalsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(MAX_ERROR_BODY).collect()),
            })?;

        parsed.into_arrivals()
    }
}

impl ArrivalsSource for ArrivalsClient {
    async fn fetch_arrivals(&self, id: StationId) -> Result<Arrivals, ArrivalsError> {
        self.get_arrivals(id).await
    }
}
