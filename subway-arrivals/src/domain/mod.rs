//! Domain types for subway arrivals.
//!
//! Stations, arrival lists and timestamp formatting. These types are shared
//! by the catalog, the arrivals client and the web layer.

mod arrival;
mod station;
mod time;

pub use arrival::{Arrivals, Direction};
pub use station::{InvalidStationId, Station, StationId, compare_names};
pub use time::{TimeFormatError, UNKNOWN_TIME, display_time, format_time};
