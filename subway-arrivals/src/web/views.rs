//! Per-view arrivals controllers.
//!
//! Each rendered index page is a view with its own [`ArrivalsController`],
//! so one visitor's selections never race another's. View ids are random
//! and a mount never reuses a live id. Views that have not been touched for
//! a while are evicted.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::arrivals::ArrivalsSource;
use crate::catalog::StationCatalog;
use crate::controller::ArrivalsController;

/// Configuration for the view registry.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Views idle for longer than this are dropped.
    pub idle_timeout: Duration,

    /// Maximum number of live views.
    pub max_views: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            max_views: 10_000,
        }
    }
}

/// Registry of live views, keyed by view id.
pub struct ViewRegistry<S> {
    views: MokaCache<u64, Arc<ArrivalsController<S>>>,
    catalog: StationCatalog,
    source: S,
}

impl<S> ViewRegistry<S>
where
    S: ArrivalsSource + Clone + Send + Sync + 'static,
{
    /// Create a registry whose controllers share `catalog` and `source`.
    pub fn new(config: &ViewConfig, catalog: StationCatalog, source: S) -> Self {
        let views = MokaCache::builder()
            .time_to_idle(config.idle_timeout)
            .max_capacity(config.max_views)
            .build();

        Self {
            views,
            catalog,
            source,
        }
    }

    /// Register a new view and return its id.
    pub async fn mount(&self) -> u64 {
        loop {
            let id: u64 = rand::random();
            let entry = self
                .views
                .entry(id)
                .or_insert_with(async { Arc::new(self.controller()) })
                .await;

            if entry.is_fresh() {
                debug!(view = id, live = self.len(), "mounted view");
                return id;
            }
        }
    }

    /// Controller for a view, creating it if the view is unknown or expired.
    pub async fn get_or_mount(&self, id: u64) -> Arc<ArrivalsController<S>> {
        self.views
            .get_with(id, async { Arc::new(self.controller()) })
            .await
    }

    /// Number of live views (approximate).
    pub fn len(&self) -> u64 {
        self.views.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn controller(&self) -> ArrivalsController<S> {
        ArrivalsController::new(self.catalog.clone(), self.source.clone())
    }
}
