//! Application state for the web layer.

use std::sync::Arc;

use crate::arrivals::ArrivalsClient;
use crate::catalog::{StationCatalog, StationDirectoryClient};

use super::views::{ViewConfig, ViewRegistry};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Sorted station list, shared by every view
    pub catalog: StationCatalog,

    /// Station directory client, used to (re)load the catalog
    pub stations: StationDirectoryClient,

    /// Arrivals feed client
    pub arrivals: ArrivalsClient,

    /// Per-view arrivals controllers
    pub views: Arc<ViewRegistry<ArrivalsClient>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: StationCatalog,
        stations: StationDirectoryClient,
        arrivals: ArrivalsClient,
        view_config: &ViewConfig,
    ) -> Self {
        let views = ViewRegistry::new(view_config, catalog.clone(), arrivals.clone());

        Self {
            catalog,
            stations,
            arrivals,
            views: Arc::new(views),
        }
    }
}
