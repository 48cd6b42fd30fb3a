//! Server configuration.
//!
//! Every setting has a default and can be overridden by an environment
//! variable.

use std::net::SocketAddr;
use std::time::Duration;

use crate::arrivals::{ArrivalsConfig, DEFAULT_ARRIVALS_URL};
use crate::catalog::{DEFAULT_STATIONS_URL, StationDirectoryConfig};

pub const ENV_BIND_ADDR: &str = "SUBWAY_BIND_ADDR";
pub const ENV_STATIONS_URL: &str = "SUBWAY_STATIONS_URL";
pub const ENV_ARRIVALS_URL: &str = "SUBWAY_ARRIVALS_URL";
pub const ENV_TIMEOUT_SECS: &str = "SUBWAY_TIMEOUT_SECS";
pub const ENV_STATIC_DIR: &str = "SUBWAY_STATIC_DIR";
pub const ENV_VIEW_IDLE_SECS: &str = "SUBWAY_VIEW_IDLE_SECS";
pub const ENV_MAX_VIEWS: &str = "SUBWAY_MAX_VIEWS";

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: String,
}

/// Configuration for the whole server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// URL of the station directory
    pub stations_url: String,

    /// Base URL of the arrivals feed
    pub arrivals_url: String,

    /// Timeout for each upstream request (seconds)
    pub timeout_secs: u64,

    /// Directory served under `/static`
    pub static_dir: String,

    /// How long an untouched view keeps its controller
    pub view_idle: Duration,

    /// Maximum number of live views
    pub max_views: u64,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: parse_var(&lookup, ENV_BIND_ADDR)?.unwrap_or(defaults.bind_addr),
            stations_url: lookup(ENV_STATIONS_URL).unwrap_or(defaults.stations_url),
            arrivals_url: lookup(ENV_ARRIVALS_URL).unwrap_or(defaults.arrivals_url),
            timeout_secs: parse_var(&lookup, ENV_TIMEOUT_SECS)?.unwrap_or(defaults.timeout_secs),
            static_dir: lookup(ENV_STATIC_DIR).unwrap_or(defaults.static_dir),
            view_idle: parse_var(&lookup, ENV_VIEW_IDLE_SECS)?
                .map(Duration::from_secs)
                .unwrap_or(defaults.view_idle),
            max_views: parse_var(&lookup, ENV_MAX_VIEWS)?.unwrap_or(defaults.max_views),
        })
    }

    /// Set the station directory URL.
    pub fn with_stations_url(mut self, url: impl Into<String>) -> Self {
        self.stations_url = url.into();
        self
    }

    /// Set the arrivals feed base URL.
    pub fn with_arrivals_url(mut self, url: impl Into<String>) -> Self {
        self.arrivals_url = url.into();
        self
    }

    /// Set the upstream request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Config for the station directory client.
    pub fn station_directory(&self) -> StationDirectoryConfig {
        StationDirectoryConfig::new()
            .with_url(&self.stations_url)
            .with_timeout(self.timeout_secs)
    }

    /// Config for the arrivals client.
    pub fn arrivals(&self) -> ArrivalsConfig {
        ArrivalsConfig::new()
            .with_base_url(&self.arrivals_url)
            .with_timeout(self.timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            stations_url: DEFAULT_STATIONS_URL.to_string(),
            arrivals_url: DEFAULT_ARRIVALS_URL.to_string(),
            timeout_secs: 10,
            static_dir: "static".to_string(),
            view_idle: Duration::from_secs(30 * 60),
            max_views: 10_000,
        }
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
