//! Station and geometry types shared by lookups and the HTTP API.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A weather reporting station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Four-letter ICAO identifier, e.g. `KJFK`
    pub icao: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Station {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

// == Geo Point ==
/// Latitude / longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Rejects non-finite or out-of-range coordinates.
    pub fn validate(&self) -> Result<()> {
        check_latitude(self.latitude)?;
        check_longitude(self.longitude)
    }

    /// Validates this point as the centre of a search of `distance_km`.
    pub fn validate_radius(&self, distance_km: f64) -> Result<()> {
        self.validate()?;
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(ServiceError::InvalidRequest(format!(
                "distance_km {} must be a non-negative number",
                distance_km
            )));
        }
        Ok(())
    }

    /// Great-circle distance in kilometres (haversine).
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }
}

// == Bounding Box ==
/// Axis-aligned latitude / longitude box. Does not wrap the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_latitude(self.min_lat)?;
        check_latitude(self.max_lat)?;
        check_longitude(self.min_lon)?;
        check_longitude(self.max_lon)?;

        if self.min_lat > self.max_lat || self.min_lon > self.max_lon {
            return Err(ServiceError::InvalidRequest(
                "bounding box minimum exceeds maximum".to_string(),
            ));
        }
        Ok(())
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }
}

fn check_latitude(value: f64) -> Result<()> {
    if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
        return Err(ServiceError::InvalidRequest(format!(
            "latitude {} is outside [-90, 90]",
            value
        )));
    }
    Ok(())
}

fn check_longitude(value: f64) -> Result<()> {
    if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
        return Err(ServiceError::InvalidRequest(format!(
            "longitude {} is outside [-180, 180]",
            value
        )));
    }
    Ok(())
}
