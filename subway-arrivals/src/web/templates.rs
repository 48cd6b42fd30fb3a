//! Askama templates for the web frontend.

use askama::Template;

use crate::controller::{ArrivalsState, ArrivalsStatus};
use crate::domain::{Direction, Station, display_time};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Station picker page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: u64,
    pub stations: Vec<StationOption>,
}

// ============================================================================
// Fragment Templates (htmx responses, no base.html)
// ============================================================================

/// Arrivals panel for the selected station.
#[derive(Template)]
#[template(path = "arrivals.html")]
pub struct ArrivalsTemplate {
    pub arrivals: ArrivalsView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One entry in the station dropdown.
#[derive(Debug, Clone)]
pub struct StationOption {
    pub id: u32,
    pub name: String,
}

impl StationOption {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.get(),
            name: station.name.clone(),
        }
    }
}

/// Arrivals state ready for rendering.
#[derive(Debug, Clone)]
pub struct ArrivalsView {
    pub status: ArrivalsStatus,
    pub station_name: String,
    pub panels: Vec<PanelView>,
}

impl ArrivalsView {
    /// Create from a controller state.
    ///
    /// Only directions with at least one arrival get a panel.
    pub fn from_state(state: &ArrivalsState) -> Self {
        let panels = match state.status {
            ArrivalsStatus::Loaded => Direction::ALL
                .into_iter()
                .filter(|d| !state.times(*d).is_empty())
                .map(|d| PanelView::new(d, state.times(d)))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            status: state.status,
            station_name: state
                .station
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            panels,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == ArrivalsStatus::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.status == ArrivalsStatus::Loading
    }

    pub fn is_failed(&self) -> bool {
        self.status == ArrivalsStatus::Failed
    }

    /// Loaded, but nothing is coming in either direction.
    pub fn is_empty(&self) -> bool {
        self.status == ArrivalsStatus::Loaded && self.panels.is_empty()
    }
}

/// Arrival times for one direction.
#[derive(Debug, Clone)]
pub struct PanelView {
    /// e.g. "Northbound"
    pub label: &'static str,
    pub times: Vec<String>,
}

impl PanelView {
    fn new(direction: Direction, times: &[String]) -> Self {
        Self {
            label: direction.label(),
            times: times.iter().map(|t| display_time(t)).collect(),
        }
    }
}
