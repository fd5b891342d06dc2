//! In-memory station directory loaded from JSON.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use super::{normalize_code, StationLookup};
use crate::error::Result;
use crate::models::{BoundingBox, GeoPoint, Station};

// == Station Directory ==
/// All stations held in memory, keyed by normalized ICAO code.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: HashMap<String, Station>,
}

impl StationDirectory {
    /// Builds a directory. Later duplicates of a code replace earlier ones.
    pub fn from_stations(stations: impl IntoIterator<Item = Station>) -> Self {
        let stations = stations
            .into_iter()
            .map(|station| (normalize_code(&station.icao), station))
            .collect();
        Self { stations }
    }

    /// Parses a JSON array of stations.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let stations: Vec<Station> = serde_json::from_str(json)?;
        Ok(Self::from_stations(stations))
    }

    /// Reads a JSON array of stations from disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let directory = Self::from_json_str(&raw)?;
        info!(path = %path.display(), stations = directory.len(), "station directory loaded");
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[async_trait]
impl StationLookup for StationDirectory {
    async fn find_one(&self, code: &str) -> Result<Option<Station>> {
        Ok(self.stations.get(&normalize_code(code)).cloned())
    }

    async fn find_by_icao(&self, codes: &[String]) -> Result<Vec<Station>> {
        let mut seen = HashSet::new();
        Ok(codes
            .iter()
            .map(|code| normalize_code(code))
            .filter(|code| seen.insert(code.clone()))
            .filter_map(|code| self.stations.get(&code).cloned())
            .collect())
    }

    async fn find_by_bbox(&self, bbox: &BoundingBox) -> Result<Vec<Station>> {
        bbox.validate()?;

        let mut found: Vec<Station> = self
            .stations
            .values()
            .filter(|station| bbox.contains(&station.location()))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.icao.cmp(&b.icao));
        Ok(found)
    }

    async fn find_by_radius(&self, center: &GeoPoint, distance_km: f64) -> Result<Vec<Station>> {
        center.validate_radius(distance_km)?;

        let mut found: Vec<(f64, &Station)> = self
            .stations
            .values()
            .map(|station| (center.distance_km(&station.location()), station))
            .filter(|(distance, _)| *distance <= distance_km)
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.icao.cmp(&b.1.icao)));
        Ok(found.into_iter().map(|(_, station)| station.clone()).collect())
    }
}
