//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Stats reporter: logs cache hit rates and evictions at configured intervals

mod stats_reporter;

pub use stats_reporter::spawn_stats_reporter;
