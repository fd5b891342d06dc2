//! API Routes
//!
//! Configures the Axum router with all station service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    bbox_handler, health_handler, radius_handler, station_handler, stations_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /stations/:code` - One station by ICAO code
/// - `GET /stations?ids=` - Several stations, unknown codes omitted
/// - `GET /search/bbox` - Stations inside a bounding box
/// - `GET /search/radius` - Stations near a point
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/stations", get(stations_handler))
        .route("/stations/:code", get(station_handler))
        .route("/search/bbox", get(bbox_handler))
        .route("/search/radius", get(radius_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
