//! API Handlers
//!
//! HTTP request handlers for each station service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::lookup::{CachedLookup, StationDirectory, StationLookup};
use crate::models::{
    BboxQuery, HealthResponse, RadiusQuery, Station, StationsQuery, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached station lookups
    pub lookup: Arc<CachedLookup<StationDirectory>>,
}

impl AppState {
    /// Creates a new AppState around a cached lookup.
    pub fn new(lookup: CachedLookup<StationDirectory>) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Creates a new AppState with cache sizes taken from the Config.
    pub fn from_config(config: &Config, directory: StationDirectory) -> Self {
        Self::new(CachedLookup::new(
            directory,
            config.station_cache_size,
            config.query_cache_size,
        ))
    }
}

/// Handler for GET /stations/:code
pub async fn station_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Station>> {
    state
        .lookup
        .find_one(&code)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::NotFound(format!("station '{}'", code)))
}

/// Handler for GET /stations?ids=
///
/// Unknown codes are left out of the response rather than failing it.
pub async fn stations_handler(
    State(state): State<AppState>,
    Query(query): Query<StationsQuery>,
) -> Result<Json<Vec<Station>>> {
    let codes = query.codes()?;
    let stations = state.lookup.find_by_icao(&codes).await?;
    Ok(Json(stations))
}

/// Handler for GET /search/bbox
pub async fn bbox_handler(
    State(state): State<AppState>,
    Query(query): Query<BboxQuery>,
) -> Result<Json<Vec<Station>>> {
    let bbox = query.to_bbox()?;
    let stations = state.lookup.find_by_bbox(&bbox).await?;
    Ok(Json(stations))
}

/// Handler for GET /search/radius
pub async fn radius_handler(
    State(state): State<AppState>,
    Query(query): Query<RadiusQuery>,
) -> Result<Json<Vec<Station>>> {
    let (center, distance_km) = query.to_search()?;
    let stations = state.lookup.find_by_radius(&center, distance_km).await?;
    Ok(Json(stations))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.lookup.stats().await;
    Json(StatsResponse {
        stations: stats.stations.into(),
        queries: stats.queries.into(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        let directory = StationDirectory::from_json_str(
            r#"[
                {"icao": "KJFK", "name": "John F Kennedy Intl", "latitude": 40.6398, "longitude": -73.7789},
                {"icao": "KLAX", "name": "Los Angeles Intl", "latitude": 33.9425, "longitude": -118.4081}
            ]"#,
        )
        .unwrap();
        AppState::from_config(&Config::default(), directory)
    }

    #[tokio::test]
    async fn test_station_handler_found() {
        let state = test_state();

        let Json(station) = station_handler(State(state.clone()), Path("kjfk".to_string()))
            .await
            .unwrap();
        assert_eq!(station.icao, "KJFK");
        assert!(state.lookup.station_cache().has("KJFK").await);
    }

    #[tokio::test]
    async fn test_station_handler_not_found() {
        let result = station_handler(State(test_state()), Path("ZZZZ".to_string())).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stations_handler_partial() {
        let query = StationsQuery {
            ids: Some("KLAX,NOPE".to_string()),
        };

        let Json(stations) = stations_handler(State(test_state()), Query(query))
            .await
            .unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].icao, "KLAX");
    }

    #[tokio::test]
    async fn test_radius_handler_validates() {
        let query = RadiusQuery {
            lat: 100.0,
            lon: 0.0,
            distance_km: 10.0,
        };

        let result = radius_handler(State(test_state()), Query(query)).await;
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        let _ = station_handler(State(state.clone()), Path("KJFK".to_string())).await;

        let Json(response) = stats_handler(State(state)).await;
        assert_eq!(response.stations.stats.misses, 1);
        assert_eq!(response.stations.stats.capacity, 512);
        assert_eq!(response.queries.stats.capacity, 64);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
