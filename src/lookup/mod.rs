//! Station Lookup Module
//!
//! The lookup capability consumed by the service, an in-memory directory that
//! implements it, and a decorator that memoizes any lookup behind LRU caches.

mod cached;
mod directory;

use async_trait::async_trait;

use crate::error::{Result, ServiceError};
use crate::models::{BoundingBox, GeoPoint, Station};

pub use cached::{CachedLookup, LookupStats, QueryKey};
pub use directory::StationDirectory;

/// Normalizes a station code for matching and cache keys.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

// == Station Lookup ==
/// Query operations over some source of station data.
///
/// A missing station is `Ok(None)` or an omitted entry, never an error.
/// Errors mean the source itself failed.
#[async_trait]
pub trait StationLookup: Send + Sync {
    /// Finds one station by ICAO code.
    async fn find_one(&self, code: &str) -> Result<Option<Station>>;

    /// Finds every known station among `codes`. Unknown codes are omitted.
    async fn find_by_icao(&self, codes: &[String]) -> Result<Vec<Station>>;

    /// Finds stations inside a bounding box.
    async fn find_by_bbox(&self, _bbox: &BoundingBox) -> Result<Vec<Station>> {
        Err(ServiceError::Unsupported("bounding box search".to_string()))
    }

    /// Finds stations within `distance_km` of `center`, nearest first.
    async fn find_by_radius(&self, _center: &GeoPoint, _distance_km: f64) -> Result<Vec<Station>> {
        Err(ServiceError::Unsupported("radius search".to_string()))
    }
}
