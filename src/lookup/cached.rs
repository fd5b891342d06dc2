//! Memoizing decorator for any [`StationLookup`].

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use super::{normalize_code, StationLookup};
use crate::cache::{CacheStats, SharedCache};
use crate::error::Result;
use crate::models::{BoundingBox, GeoPoint, Station};

// == Query Key ==
/// Hashable signature of a geometric query.
///
/// Fields hold the exact bit patterns of the query's coordinates, so two
/// keys are equal only when the queries are. Inputs are validated before a
/// key is built, which keeps NaN out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Bbox {
        min_lat: u64,
        min_lon: u64,
        max_lat: u64,
        max_lon: u64,
    },
    Radius {
        lat: u64,
        lon: u64,
        distance_km: u64,
    },
}

impl QueryKey {
    pub fn bbox(bbox: &BoundingBox) -> Self {
        QueryKey::Bbox {
            min_lat: key_bits(bbox.min_lat),
            min_lon: key_bits(bbox.min_lon),
            max_lat: key_bits(bbox.max_lat),
            max_lon: key_bits(bbox.max_lon),
        }
    }

    pub fn radius(center: &GeoPoint, distance_km: f64) -> Self {
        QueryKey::Radius {
            lat: key_bits(center.latitude),
            lon: key_bits(center.longitude),
            distance_km: key_bits(distance_km),
        }
    }
}

fn key_bits(value: f64) -> u64 {
    // -0.0 and 0.0 compare equal but differ in bits
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Statistics for both caches of a [`CachedLookup`].
#[derive(Debug, Clone, Serialize)]
pub struct LookupStats {
    pub stations: CacheStats,
    pub queries: CacheStats,
}

// == Cached Lookup ==
/// Puts LRU caches in front of another lookup.
///
/// Stations are cached per normalized code, geometric queries per
/// [`QueryKey`]. Only successful, non-empty answers for a code are stored:
/// unknown codes and backend failures always go back to the inner lookup.
#[derive(Debug)]
pub struct CachedLookup<L> {
    inner: L,
    stations: SharedCache<String, Station>,
    queries: SharedCache<QueryKey, Vec<Station>>,
}

impl<L: StationLookup> CachedLookup<L> {
    pub fn new(inner: L, station_capacity: usize, query_capacity: usize) -> Self {
        Self {
            inner,
            stations: SharedCache::new(station_capacity),
            queries: SharedCache::new(query_capacity),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn station_cache(&self) -> &SharedCache<String, Station> {
        &self.stations
    }

    pub fn query_cache(&self) -> &SharedCache<QueryKey, Vec<Station>> {
        &self.queries
    }

    pub async fn stats(&self) -> LookupStats {
        LookupStats {
            stations: self.stations.stats().await,
            queries: self.queries.stats().await,
        }
    }

    /// Forgets one station so the next lookup reaches the inner source.
    pub async fn invalidate(&self, code: &str) {
        self.stations.delete(normalize_code(code).as_str()).await;
    }

    pub async fn clear(&self) {
        self.stations.clear().await;
        self.queries.clear().await;
    }

    async fn cached_query<F>(&self, key: QueryKey, fetch: F) -> Result<Vec<Station>>
    where
        F: std::future::Future<Output = Result<Vec<Station>>> + Send,
    {
        if let Some(hit) = self.queries.get(&key).await {
            debug!(?key, "query cache hit");
            return Ok(hit);
        }

        debug!(?key, "query cache miss");
        let found = fetch.await?;
        self.queries.set(key, found.clone()).await;
        Ok(found)
    }
}

#[async_trait]
impl<L: StationLookup> StationLookup for CachedLookup<L> {
    async fn find_one(&self, code: &str) -> Result<Option<Station>> {
        let key = normalize_code(code);

        if let Some(station) = self.stations.get(key.as_str()).await {
            debug!(code = %key, "station cache hit");
            return Ok(Some(station));
        }

        debug!(code = %key, "station cache miss");
        let found = self.inner.find_one(&key).await?;
        if let Some(station) = &found {
            self.stations.set(key, station.clone()).await;
        }
        Ok(found)
    }

    async fn find_by_icao(&self, codes: &[String]) -> Result<Vec<Station>> {
        let mut seen = HashSet::new();
        let keys: Vec<String> = codes
            .iter()
            .map(|code| normalize_code(code))
            .filter(|key| seen.insert(key.clone()))
            .collect();

        let (mut resolved, missing) = self
            .stations
            .with_lock(|cache| {
                let mut resolved = HashMap::new();
                let mut missing = Vec::new();
                for key in &keys {
                    match cache.get(key.as_str()) {
                        Some(station) => {
                            resolved.insert(key.clone(), station.clone());
                        }
                        None => missing.push(key.clone()),
                    }
                }
                (resolved, missing)
            })
            .await;

        if !missing.is_empty() {
            debug!(
                requested = keys.len(),
                missing = missing.len(),
                "forwarding uncached station codes"
            );
            let fetched = self.inner.find_by_icao(&missing).await?;
            self.stations
                .with_lock(|cache| {
                    for station in &fetched {
                        cache.set(normalize_code(&station.icao), station.clone());
                    }
                })
                .await;
            resolved.extend(
                fetched
                    .into_iter()
                    .map(|station| (normalize_code(&station.icao), station)),
            );
        }

        Ok(keys.iter().filter_map(|key| resolved.remove(key)).collect())
    }

    async fn find_by_bbox(&self, bbox: &BoundingBox) -> Result<Vec<Station>> {
        bbox.validate()?;
        self.cached_query(QueryKey::bbox(bbox), self.inner.find_by_bbox(bbox))
            .await
    }

    async fn find_by_radius(&self, center: &GeoPoint, distance_km: f64) -> Result<Vec<Station>> {
        center.validate_radius(distance_km)?;
        self.cached_query(
            QueryKey::radius(center, distance_km),
            self.inner.find_by_radius(center, distance_km),
        )
        .await
    }
}
