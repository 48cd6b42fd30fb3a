//! Station catalog.
//!
//! Loads the station directory (a JSON object keyed by numeric station id)
//! and exposes it as a name-sorted list for the station picker.

mod client;
mod error;
mod store;

pub use client::{
    DEFAULT_STATIONS_URL, StationDirectory, StationDirectoryClient, StationDirectoryConfig,
    StationRecord, StationSource,
};
pub use error::CatalogError;
pub use store::{StationCatalog, build_stations};
