//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::arrivals::ArrivalsError;
use crate::controller::FetchOutcome;
use crate::domain::StationId;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/arrivals", get(arrivals_fragment))
        .route("/api/stations", get(list_stations))
        .route("/api/arrivals/:id", get(station_arrivals))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Station picker page.
///
/// Every render is a new view with its own controller.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    if state.catalog.is_empty() {
        // The startup load failed; each new view gets one more attempt.
        if let Err(e) = state.catalog.load(&state.stations).await {
            warn!(error = %e, "failed to load station catalog");
        }
    }

    let view = state.views.mount().await;
    let stations = state
        .catalog
        .stations()
        .iter()
        .map(StationOption::from_station)
        .collect();

    render(IndexTemplate { view, stations })
}

/// Select a station for a view and render its arrivals.
///
/// A request overtaken by a newer selection on the same view renders
/// nothing, so it can never leave the other request's spinner behind.
async fn arrivals_fragment(
    State(state): State<AppState>,
    Query(query): Query<ArrivalsQuery>,
) -> Result<Response, AppError> {
    let controller = state.views.get_or_mount(query.view).await;

    if controller.select_and_fetch(&query.station).await == Some(FetchOutcome::Superseded) {
        return Ok((StatusCode::NO_CONTENT, [("HX-Reswap", "none")]).into_response());
    }

    let html = render(ArrivalsTemplate {
        arrivals: ArrivalsView::from_state(&controller.state()),
    })?;
    Ok(html.into_response())
}

/// All stations, sorted by name.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state
        .catalog
        .stations()
        .iter()
        .map(StationResult::from_station)
        .collect();

    Json(StationsResponse { stations })
}

/// Upcoming arrivals at one station.
async fn station_arrivals(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<ArrivalsResult>, AppError> {
    let arrivals = state.arrivals.get_arrivals(StationId::new(id)).await?;
    Ok(Json(ArrivalsResult::from_arrivals(&arrivals)))
}

fn render(template: impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadGateway { message: String },
    Internal { message: String },
}

impl From<ArrivalsError> for AppError {
    fn from(e: ArrivalsError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadGateway { message } => {
                warn!(%message, "upstream request failed");
                (StatusCode::BAD_GATEWAY, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::{ArrivalsClient, ArrivalsConfig};
    use crate::catalog::{StationCatalog, StationDirectoryClient, StationDirectoryConfig};
    use crate::test_support::{ARRIVALS_JSON, STATIONS_JSON, serve};
    use crate::web::ViewConfig;
    use serde_json::Value;
    use std::time::Duration;

    /// Upstream with a station directory and arrivals for two stations.
    fn upstream() -> Router {
        Router::new()
            .route("/stations.json", get(|| async { STATIONS_JSON }))
            .route(
                "/by-id/:id",
                get(|Path(id): Path<String>| async move {
                    match id.as_str() {
                        "127" => (StatusCode::OK, ARRIVALS_JSON),
                        "418" => (StatusCode::OK, r#"{"updated": "never"}"#),
                        "120" => {
                            tokio::time::sleep(Duration::from_millis(1500)).await;
                            (StatusCode::OK, ARRIVALS_JSON)
                        }
                        _ => (StatusCode::NOT_FOUND, "no such station"),
                    }
                }),
            )
    }

    /// Start the app against `upstream` and return its base URL.
    async fn start(upstream_base: &str, load_catalog: bool) -> String {
        let stations = StationDirectoryClient::new(
            StationDirectoryConfig::new().with_url(format!("{upstream_base}/stations.json")),
        )
        .unwrap();
        let arrivals =
            ArrivalsClient::new(ArrivalsConfig::new().with_base_url(upstream_base)).unwrap();

        let catalog = StationCatalog::new();
        if load_catalog {
            catalog.load(&stations).await.unwrap();
        }

        let state = AppState::new(catalog, stations, arrivals, &ViewConfig::default());
        serve(create_router(state, "static")).await
    }

    async fn app() -> String {
        let upstream = serve(upstream()).await;
        start(&upstream, true).await
    }

    async fn fragment(base: &str, view: &str, station: &str) -> String {
        reqwest::Client::new()
            .get(format!("{base}/arrivals"))
            .query(&[("view", view), ("station", station)])
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let base = app().await;
        let body = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn index_lists_stations_in_order() {
        let base = app().await;
        let html = reqwest::get(format!("{base}/"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        let fulton = html.find(">Fulton St<").unwrap();
        let times_sq = html.find(">Times Sq - 42 St<").unwrap();
        let union_sq = html.find(">14 St - Union Sq<").unwrap();
        assert!(union_sq < fulton && fulton < times_sq);
        assert!(!html.contains("Bad Key"));
    }

    #[tokio::test]
    async fn index_retries_empty_catalog() {
        let upstream = serve(upstream()).await;
        let base = start(&upstream, false).await;

        let html = reqwest::get(format!("{base}/"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert!(html.contains(">Fulton St<"));
    }

    #[tokio::test]
    async fn index_survives_unavailable_directory() {
        let upstream = serve(Router::new()).await;
        let base = start(&upstream, false).await;

        let response = reqwest::get(format!("{base}/")).await.unwrap();
        assert_eq!(response.status(), 200);
        let html = response.text().await.unwrap();
        assert!(html.contains("Stations are unavailable right now"));
    }

    #[tokio::test]
    async fn fragment_renders_both_directions() {
        let base = app().await;

        let html = fragment(&base, "1", "Times Sq - 42 St").await;

        assert!(html.contains("Northbound Arrival Times:"));
        assert!(html.contains("Southbound Arrival Times:"));
        assert!(html.contains("8:00 AM"));
        assert!(html.contains("8:04 AM"));
        assert!(html.contains("8:02 AM"));
        assert_eq!(html.matches(r#"class="time""#).count(), 3);
    }

    #[tokio::test]
    async fn fragment_for_unknown_station_keeps_state() {
        let base = app().await;

        let idle = fragment(&base, "1", "Nowhere").await;
        assert!(idle.contains("Choose a station"));

        fragment(&base, "2", "Times Sq - 42 St").await;
        let still_loaded = fragment(&base, "2", "Nowhere").await;
        assert!(still_loaded.contains("Northbound Arrival Times:"));
    }

    #[tokio::test]
    async fn fragment_for_malformed_payload_shows_failure() {
        let base = app().await;

        let html = fragment(&base, "1", "Fulton St").await;

        assert!(html.contains("Couldn't load arrival times for Fulton St"));
        assert!(!html.contains("loading-ellipsis"));
    }

    #[tokio::test]
    async fn fragment_is_repeatable() {
        let base = app().await;

        let first = fragment(&base, "1", "Times Sq - 42 St").await;
        let second = fragment(&base, "1", "Times Sq - 42 St").await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn overtaken_fragment_renders_nothing() {
        let base = app().await;

        let slow = tokio::spawn({
            let base = base.clone();
            async move {
                reqwest::Client::new()
                    .get(format!("{base}/arrivals"))
                    .query(&[("view", "7"), ("station", "96 St")])
                    .send()
                    .await
                    .unwrap()
            }
        });
        tokio::time::sleep(Duration::from_millis(200)).await;
        let fast = fragment(&base, "7", "Times Sq - 42 St").await;

        let slow = slow.await.unwrap();
        assert_eq!(slow.status(), 204);
        assert_eq!(slow.headers()["hx-reswap"], "none");
        assert!(!slow.text().await.unwrap().contains("loading-ellipsis"));
        assert!(fast.contains("Northbound Arrival Times:"));
    }

    #[tokio::test]
    async fn fragment_rejects_missing_view() {
        let base = app().await;
        let response = reqwest::Client::new()
            .get(format!("{base}/arrivals"))
            .query(&[("station", "96 St")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn api_lists_stations() {
        let base = app().await;
        let json: Value = reqwest::get(format!("{base}/api/stations"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let stations = json["stations"].as_array().unwrap();
        assert_eq!(stations.len(), 5);
        assert_eq!(stations[0]["name"], "14 St - Union Sq");
        assert_eq!(stations[0]["id"], 635);
    }

    #[tokio::test]
    async fn api_returns_arrivals() {
        let base = app().await;
        let json: Value = reqwest::get(format!("{base}/api/arrivals/127"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(json["north"].as_array().unwrap().len(), 2);
        assert_eq!(json["north"][0]["time"], "2024-01-01T08:00:00-05:00");
        assert_eq!(json["north"][0]["display"], "8:00 AM");
        assert_eq!(json["south"][0]["display"], "8:02 AM");
    }

    #[tokio::test]
    async fn api_maps_upstream_failure_to_bad_gateway() {
        let base = app().await;
        let response = reqwest::get(format!("{base}/api/arrivals/999")).await.unwrap();

        assert_eq!(response.status(), 502);
        let json: Value = response.json().await.unwrap();
        assert!(json["error"].as_str().unwrap().contains("404"));
    }
}
