use std::error::Error;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use subway_arrivals::arrivals::ArrivalsClient;
use subway_arrivals::catalog::{StationCatalog, StationDirectoryClient};
use subway_arrivals::config::AppConfig;
use subway_arrivals::web::{AppState, ViewConfig, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    let stations = StationDirectoryClient::new(config.station_directory())?;
    let arrivals = ArrivalsClient::new(config.arrivals())?;

    // A missing catalog is not fatal: the page still renders and the next
    // view to mount tries again.
    info!(url = %config.stations_url, "fetching station catalog");
    let catalog = StationCatalog::new();
    if let Err(e) = catalog.load(&stations).await {
        warn!(error = %e, "failed to load station catalog");
    }

    let view_config = ViewConfig {
        idle_timeout: config.view_idle,
        max_views: config.max_views,
    };
    let state = AppState::new(catalog, stations, arrivals, &view_config);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Subway arrivals listening on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET  /health              - Health check");
    info!("  GET  /api/stations        - Station list");
    info!("  GET  /api/arrivals/:id    - Arrivals at a station");

    axum::serve(listener, app).await?;
    Ok(())
}
