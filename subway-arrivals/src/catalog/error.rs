//! Station directory error types.

/// Errors that can occur while loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Directory returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Payload did not match the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
