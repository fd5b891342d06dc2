//! Request DTOs for the station API
//!
//! Query-string parameters for the lookup endpoints.

use serde::Deserialize;

use crate::error::{Result, ServiceError};
use crate::models::{BoundingBox, GeoPoint};

/// Maximum number of codes accepted by one batch lookup
pub const MAX_BATCH_CODES: usize = 100;

/// Query for GET /stations?ids=KJFK,KLAX
#[derive(Debug, Clone, Deserialize)]
pub struct StationsQuery {
    /// Comma separated ICAO codes
    #[serde(default)]
    pub ids: Option<String>,
}

impl StationsQuery {
    /// Splits `ids` into trimmed, non-empty codes.
    pub fn codes(&self) -> Result<Vec<String>> {
        let codes: Vec<String> = self
            .ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect();

        if codes.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "ids must list at least one station code".to_string(),
            ));
        }
        if codes.len() > MAX_BATCH_CODES {
            return Err(ServiceError::InvalidRequest(format!(
                "at most {} station codes per request",
                MAX_BATCH_CODES
            )));
        }
        Ok(codes)
    }
}

/// Query for GET /search/bbox
#[derive(Debug, Clone, Deserialize)]
pub struct BboxQuery {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BboxQuery {
    pub fn to_bbox(&self) -> Result<BoundingBox> {
        let bbox = BoundingBox::new(self.min_lat, self.min_lon, self.max_lat, self.max_lon);
        bbox.validate()?;
        Ok(bbox)
    }
}

/// Query for GET /search/radius
#[derive(Debug, Clone, Deserialize)]
pub struct RadiusQuery {
    pub lat: f64,
    pub lon: f64,
    pub distance_km: f64,
}

impl RadiusQuery {
    /// Returns the validated centre and distance.
    pub fn to_search(&self) -> Result<(GeoPoint, f64)> {
        let center = GeoPoint::new(self.lat, self.lon);
        center.validate_radius(self.distance_km)?;
        Ok((center, self.distance_km))
    }
}
