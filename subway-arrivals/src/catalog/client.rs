//! Station directory client.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::error::CatalogError;

/// Default URL of the station directory.
pub const DEFAULT_STATIONS_URL: &str =
    "https://raw.githubusercontent.com/jonthornton/MTAPI/master/data/stations.json";

/// One entry of the station directory. Other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    pub name: String,
}

/// The raw directory: station id (as a decimal string) to record.
pub type StationDirectory = BTreeMap<String, StationRecord>;

/// Something that can produce the station directory.
pub trait StationSource {
    fn fetch_directory(&self) -> impl Future<Output = Result<StationDirectory, CatalogError>> + Send;
}

/// Configuration for the station directory client.
#[derive(Debug, Clone)]
pub struct StationDirectoryConfig {
    /// URL of the directory JSON document
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationDirectoryConfig {
    /// Create a config pointing at the default directory.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_STATIONS_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom directory URL (for testing).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StationDirectoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the station directory.
#[derive(Debug, Clone)]
pub struct StationDirectoryClient {
    http: reqwest::Client,
    url: String,
}

impl StationDirectoryClient {
    /// Create a new directory client.
    pub fn new(config: StationDirectoryConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Fetch and parse the whole directory.
    pub async fn fetch_all(&self) -> Result<StationDirectory, CatalogError> {
        debug!(url = %self.url, "fetching station directory");

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| CatalogError::Json {
            message: e.to_string(),
        })
    }
}

impl StationSource for StationDirectoryClient {
    async fn fetch_directory(&self) -> Result<StationDirectory, CatalogError> {
        self.fetch_all().await
    }
}
