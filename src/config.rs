//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cache::MIN_CAPACITY;
use crate::error::{Result, ServiceError};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of stations kept in the station cache
    pub station_cache_size: usize,
    /// Maximum number of bounding-box / radius results kept
    pub query_cache_size: usize,
    /// HTTP server port
    pub server_port: u16,
    /// JSON file holding the station directory
    pub stations_file: PathBuf,
    /// Interval in seconds between cache statistics reports
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STATION_CACHE_SIZE` - Station cache capacity (default: 512)
    /// - `QUERY_CACHE_SIZE` - Query cache capacity (default: 64)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATIONS_FILE` - Station directory path (default: stations.json)
    /// - `STATS_INTERVAL` - Stats report frequency in seconds (default: 60)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let station_cache_size = match lookup("STATION_CACHE_SIZE") {
            Some(raw) => parse_capacity(&raw)?,
            None => defaults.station_cache_size,
        };
        let query_cache_size = match lookup("QUERY_CACHE_SIZE") {
            Some(raw) => parse_capacity(&raw)?,
            None => defaults.query_cache_size,
        };

        Ok(Self {
            station_cache_size,
            query_cache_size,
            server_port: parse_or("SERVER_PORT", lookup("SERVER_PORT"), defaults.server_port)?,
            stations_file: lookup("STATIONS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.stations_file),
            stats_interval: parse_or(
                "STATS_INTERVAL",
                lookup("STATS_INTERVAL"),
                defaults.stats_interval,
            )?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            station_cache_size: 512,
            query_cache_size: 64,
            server_port: 3000,
            stations_file: PathBuf::from("stations.json"),
            stats_interval: 60,
        }
    }
}

// == Capacity Parsing ==
/// Parses a cache capacity.
///
/// Any integer is accepted and values below one are clamped to one.
/// Non-numeric input is rejected.
pub fn parse_capacity(raw: &str) -> Result<usize> {
    let parsed: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ServiceError::InvalidCapacity(format!("'{}' is not an integer", raw)))?;

    if parsed < MIN_CAPACITY as i64 {
        return Ok(MIN_CAPACITY);
    }
    Ok(usize::try_from(parsed).unwrap_or(usize::MAX))
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ServiceError::Config(format!("{} has invalid value '{}'", name, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.station_cache_size, 512);
        assert_eq!(config.query_cache_size, 64);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.stations_file, PathBuf::from("stations.json"));
        assert_eq!(config.stats_interval, 60);
    }

    #[test]
    fn test_config_without_vars_uses_defaults() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_config_reads_values() {
        let config = config_from(&[
            ("STATION_CACHE_SIZE", "100"),
            ("QUERY_CACHE_SIZE", " 8 "),
            ("SERVER_PORT", "8080"),
            ("STATIONS_FILE", "/data/stations.json"),
            ("STATS_INTERVAL", "5"),
        ])
        .unwrap();

        assert_eq!(config.station_cache_size, 100);
        assert_eq!(config.query_cache_size, 8);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.stations_file, PathBuf::from("/data/stations.json"));
        assert_eq!(config.stats_interval, 5);
    }

    #[test]
    fn test_capacity_clamps_to_one() {
        assert_eq!(parse_capacity("0").unwrap(), 1);
        assert_eq!(parse_capacity("-25").unwrap(), 1);
        assert_eq!(parse_capacity("7").unwrap(), 7);

        let config = config_from(&[("QUERY_CACHE_SIZE", "-3")]).unwrap();
        assert_eq!(config.query_cache_size, 1);
    }

    #[test]
    fn test_non_numeric_capacity_is_rejected() {
        assert!(matches!(
            parse_capacity("lots"),
            Err(ServiceError::InvalidCapacity(_))
        ));
        assert!(matches!(
            config_from(&[("STATION_CACHE_SIZE", "1.5")]),
            Err(ServiceError::InvalidCapacity(_))
        ));
    }

    #[test]
    fn test_bad_port_is_rejected() {
        assert!(matches!(
            config_from(&[("SERVER_PORT", "70000")]),
            Err(ServiceError::Config(_))
        ));
    }
}
