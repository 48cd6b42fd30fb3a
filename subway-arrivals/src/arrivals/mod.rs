//! Arrivals feed client.
//!
//! Fetches predicted arrival times for one station from the public feed and
//! validates the payload into [`Arrivals`](crate::domain::Arrivals).
//!
//! Key characteristics of the feed:
//! - Stations are addressed by the same numeric id as the station directory
//! - Times are ISO-8601 strings with a UTC offset
//! - `N` and `S` hold northbound and southbound arrivals, soonest first

mod client;
mod error;
mod types;

pub use client::{ArrivalsClient, ArrivalsConfig, ArrivalsSource, DEFAULT_ARRIVALS_URL};
pub use error::ArrivalsError;
pub use types::{ArrivalRecord, ArrivalsResponse, StationArrivals};
