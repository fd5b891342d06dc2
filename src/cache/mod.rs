//! Cache Module
//!
//! Provides a generic bounded LRU cache and a lock-guarded shared handle to it.

mod recency;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use recency::{Iter, NodeId, RecencyList};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::{EvictionListener, LruCache};

// == Public Constants ==
/// Smallest capacity a cache can be constructed with
pub const MIN_CAPACITY: usize = 1;
