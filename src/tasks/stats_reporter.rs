//! Stats Reporter Task
//!
//! Background task that periodically logs cache statistics.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::lookup::{CachedLookup, StationLookup};

/// Spawns a background task that logs station and query cache statistics.
///
/// The task sleeps for `interval_secs` between reports and runs until the
/// returned handle is aborted.
pub fn spawn_stats_reporter<L>(lookup: Arc<CachedLookup<L>>, interval_secs: u64) -> JoinHandle<()>
where
    L: StationLookup + 'static,
{
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "Starting cache stats reporter");

        loop {
            tokio::time::sleep(interval).await;

            let stats = lookup.stats().await;
            info!(
                station_entries = stats.stations.total_entries,
                station_hit_rate = stats.stations.hit_rate(),
                station_evictions = stats.stations.evictions,
                query_entries = stats.queries.total_entries,
                query_hit_rate = stats.queries.hit_rate(),
                query_evictions = stats.queries.evictions,
                "cache stats"
            );
        }
    })
}
