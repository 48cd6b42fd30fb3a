//! Display formatting for arrival timestamps.
//!
//! The arrivals feed reports times as ISO-8601 strings with a UTC offset,
//! e.g. `2024-01-01T08:04:12-05:00`. They are shown as `h:mm AM/PM` in the
//! offset the feed used, which is the station's local time.

use chrono::{DateTime, NaiveDateTime};
use tracing::warn;

/// Shown in place of a timestamp that could not be parsed.
pub const UNKNOWN_TIME: &str = "unknown";

const DISPLAY_FORMAT: &str = "%-I:%M %p";

/// Error returned when a timestamp is not valid ISO-8601.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}")]
pub struct TimeFormatError {
    input: String,
}

/// Format an ISO-8601 timestamp as `h:mm AM/PM`.
///
/// Timestamps without an offset are taken as already local.
///
/// # Examples
///
/// ```
/// use subway_arrivals::domain::format_time;
///
/// assert_eq!(format_time("2024-01-01T08:00:00Z").unwrap(), "8:00 AM");
/// assert_eq!(format_time("2024-01-01T17:45:30-05:00").unwrap(), "5:45 PM");
/// assert!(format_time("soon").is_err());
/// ```
pub fn format_time(iso: &str) -> Result<String, TimeFormatError> {
    let iso = iso.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Ok(dt.format(DISPLAY_FORMAT).to_string());
    }

    iso.parse::<NaiveDateTime>()
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .map_err(|_| TimeFormatError {
            input: iso.to_string(),
        })
}

/// Format a timestamp for display, falling back to [`UNKNOWN_TIME`].
///
/// The failure is logged so a feed that starts sending bad data is visible.
pub fn display_time(iso: &str) -> String {
    format_time(iso).unwrap_or_else(|e| {
        warn!(error = %e, "failed to format arrival time");
        UNKNOWN_TIME.to_string()
    })
}
