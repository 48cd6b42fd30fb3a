//! Web layer for subway arrivals.
//!
//! Serves the station picker page, the htmx arrivals fragment and a small
//! JSON API over the same data.

mod dto;
mod routes;
mod state;
pub mod templates;
mod views;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
pub use views::{ViewConfig, ViewRegistry};
