//! Station Cache - bounded LRU caching for weather-station lookups
//!
//! Provides a generic O(1) LRU cache and a small HTTP service that memoizes
//! station lookups by code, bounding box, and radius.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{LruCache, SharedCache};
pub use config::Config;
pub use error::{Result, ServiceError};
pub use tasks::spawn_stats_reporter;
