//! Wire types for the arrivals feed.
//!
//! The feed answers `/by-id/<id>` with
//! `{"data": [{"N": [{"time": ...}], "S": [{"time": ...}], ...}], ...}`.
//! Only the fields needed for display are modelled; everything else is
//! ignored by serde.

use serde::Deserialize;

use crate::domain::Arrivals;

use super::error::ArrivalsError;

/// Top-level arrivals response.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrivalsResponse {
    pub data: Vec<StationArrivals>,
}

/// Arrivals at one station, split by direction.
#[derive(Debug, Clone, Deserialize)]
pub struct StationArrivals {
    #[serde(rename = "N")]
    pub north: Vec<ArrivalRecord>,

    #[serde(rename = "S")]
    pub south: Vec<ArrivalRecord>,
}

/// A single predicted arrival.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrivalRecord {
    /// ISO-8601 timestamp
    pub time: String,
}

impl ArrivalsResponse {
    /// Take the first station record and keep only its timestamps.
    pub fn into_arrivals(self) -> Result<Arrivals, ArrivalsError> {
        let station = self.data.into_iter().next().ok_or(ArrivalsError::NoData)?;

        Ok(Arrivals::new(
            station.north.into_iter().map(|r| r.time).collect(),
            station.south.into_iter().map(|r| r.time).collect(),
        ))
    }
}
