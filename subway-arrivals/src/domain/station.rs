//! Station identity types.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// Numeric identifier of a station in the station directory.
///
/// The directory keys stations by their id written as a decimal string.
/// This type only accepts plain ASCII digits, so `" 12"`, `"+12"` and
/// `"1e3"` are all rejected.
///
/// # Examples
///
/// ```
/// use subway_arrivals::domain::StationId;
///
/// let id = StationId::parse("127").unwrap();
/// assert_eq!(id.get(), 127);
/// assert_eq!(id.to_string(), "127");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("12a").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(u32);

impl StationId {
    /// Wrap a raw numeric id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Parse a station id from its directory key.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStationId {
                reason: "must contain only ASCII digits",
            });
        }

        s.parse::<u32>().map(Self).map_err(|_| InvalidStationId {
            reason: "out of range",
        })
    }

    /// The raw numeric id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selectable station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
}

impl Station {
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Compare two station names the way a browser's default collation would.
///
/// Names are compared case-insensitively first, by code point after
/// lowercasing. Names that differ only in case put the lowercase form first.
///
/// This is close to, but not the same as, a full locale collation: ASCII
/// punctuation sorts by code point (`:` and `@` after digits) and accented
/// letters sort after `z`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| b.cmp(a))
}
