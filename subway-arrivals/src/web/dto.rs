//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Arrivals, Station, display_time};

/// Query for the arrivals fragment.
#[derive(Debug, Deserialize)]
pub struct ArrivalsQuery {
    /// View that made the selection
    pub view: u64,

    /// Selected station name
    pub station: String,
}

/// A station in the station list.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: u32,
    pub name: String,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.get(),
            name: station.name.clone(),
        }
    }
}

/// Response for the station list.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// One arrival time, raw and formatted.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ArrivalTimeResult {
    /// ISO-8601 timestamp as sent by the feed
    pub time: String,

    /// `h:mm AM/PM`, or "unknown" if the timestamp is invalid
    pub display: String,
}

impl ArrivalTimeResult {
    pub fn from_time(time: &str) -> Self {
        Self {
            time: time.to_string(),
            display: display_time(time),
        }
    }
}

/// Response for a station's arrivals.
#[derive(Debug, Serialize)]
pub struct ArrivalsResult {
    pub north: Vec<ArrivalTimeResult>,
    pub south: Vec<ArrivalTimeResult>,
}

impl ArrivalsResult {
    pub fn from_arrivals(arrivals: &Arrivals) -> Self {
        let convert = |times: &[String]| -> Vec<ArrivalTimeResult> {
            times
                .iter()
                .map(|t| ArrivalTimeResult::from_time(t))
                .collect()
        };

        Self {
            north: convert(&arrivals.north),
            south: convert(&arrivals.south),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
