//! Helpers for tests that need a real HTTP upstream.

use axum::Router;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A station directory payload with a handful of real station names.
pub const STATIONS_JSON: &str = r#"{
    "127": {"name": "Times Sq - 42 St", "location": [40.75529, -73.987495]},
    "120": {"name": "96 St", "location": [40.793919, -73.972323]},
    "635": {"name": "14 St - Union Sq", "location": [40.734673, -73.989951]},
    "A32": {"name": "Bad Key"},
    "418": {"name": "Fulton St"},
    "101": {"name": "astoria Blvd"}
}"#;

/// An arrivals payload for one station.
pub const ARRIVALS_JSON: &str = r#"{
    "data": [
        {
            "N": [
                {"route": "1", "time": "2024-01-01T08:00:00-05:00"},
                {"route": "2", "time": "2024-01-01T08:04:30-05:00"}
            ],
            "S": [
                {"route": "1", "time": "2024-01-01T08:02:00-05:00"}
            ],
            "id": "127",
            "name": "Times Sq - 42 St"
        }
    ],
    "updated": "2024-01-01T07:59:40-05:00"
}"#;
