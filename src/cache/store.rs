//! LRU Cache Module
//!
//! Generic capacity-bounded cache combining a HashMap with an O(1) recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::cache::{CacheStats, NodeId, RecencyList, MIN_CAPACITY};

/// Upper bound on slots reserved up front; larger caches grow on demand.
const PREALLOCATE_LIMIT: usize = 1024;

/// Callback invoked with each entry evicted to make room.
pub type EvictionListener<K, V> = Box<dyn FnMut(&K, &V) + Send>;

struct Slot<V> {
    value: V,
    node: NodeId,
}

// == LRU Cache ==
/// Bounded cache that evicts the least recently used entry on overflow.
///
/// `get` and `set` refresh recency. `has` and `peek` never do, so probing a key
/// does not change which entry is evicted next.
pub struct LruCache<K, V> {
    /// Key to value and recency handle
    entries: HashMap<K, Slot<V>>,
    /// Access order, front is the next eviction candidate
    recency: RecencyList<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of resident entries, always >= 1
    capacity: usize,
    on_evict: Option<EvictionListener<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `max_size` entries.
    ///
    /// A `max_size` of zero is clamped to one.
    pub fn new(max_size: usize) -> Self {
        let capacity = max_size.max(MIN_CAPACITY);
        let mut stats = CacheStats::new();
        stats.set_capacity(capacity);

        let reserve = capacity.min(PREALLOCATE_LIMIT);

        Self {
            entries: HashMap::with_capacity(reserve),
            recency: RecencyList::with_capacity(reserve),
            stats,
            capacity,
            on_evict: None,
        }
    }

    /// Creates a cache that reports every eviction to `listener`.
    pub fn with_eviction_listener<F>(max_size: usize, listener: F) -> Self
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        let mut cache = Self::new(max_size);
        cache.set_eviction_listener(listener);
        cache
    }

    /// Installs or replaces the eviction listener.
    ///
    /// The listener runs for capacity evictions only, not for `delete`,
    /// `clear`, or overwriting a resident key.
    pub fn set_eviction_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        self.on_evict = Some(Box::new(listener));
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get(key) {
            Some(slot) => {
                self.recency.move_to_back(slot.node);
                self.stats.record_hit();
                Some(&slot.value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Returns the value for `key` without touching recency or statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(|slot| &slot.value)
    }

    // == Set ==
    /// Stores a key-value pair as the most recently used entry.
    ///
    /// An existing key has its value replaced in place. A new key may push the
    /// cache over capacity, in which case least recently used entries are
    /// evicted until it fits.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(slot) = self.entries.get_mut(&key) {
            slot.value = value;
            self.recency.move_to_back(slot.node);
            self.stats.record_update();
            return;
        }

        let node = self.recency.push_back(key.clone());
        self.entries.insert(key, Slot { value, node });
        self.stats.record_insert();
        self.evict_overflow();
    }

    // == Has ==
    /// Checks whether `key` is resident. Does not refresh recency.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    // == Delete ==
    /// Removes `key` and returns its value. Absent keys are a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.entries.remove(key)?;
        self.recency.remove(slot.node);
        self.stats.set_total_entries(self.entries.len());
        Some(slot.value)
    }

    // == Snapshots ==
    /// Returns resident keys, least recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.recency.iter().cloned().collect()
    }

    /// Returns resident values, least recently used first.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.recency
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|slot| (key, &slot.value)))
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.stats.set_total_entries(0);
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, evicting least recently used entries if the cache
    /// no longer fits. Returns the number of entries evicted.
    pub fn set_capacity(&mut self, max_size: usize) -> usize {
        self.capacity = max_size.max(MIN_CAPACITY);
        self.stats.set_capacity(self.capacity);

        let evicted = self.evict_overflow();
        debug!(capacity = self.capacity, evicted, "cache capacity changed");
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset_counters();
    }

    /// Evicts from the front of the recency list until the size invariant holds.
    fn evict_overflow(&mut self) -> usize {
        let mut evicted = 0;

        while self.entries.len() > self.capacity {
            let Some(key) = self.recency.pop_front() else {
                break;
            };
            if let Some(slot) = self.entries.remove(&key) {
                if let Some(listener) = self.on_evict.as_mut() {
                    listener(&key, &slot.value);
                }
                self.stats.record_eviction();
                evicted += 1;
            }
        }

        if evicted > 0 {
            trace!(evicted, capacity = self.capacity, "evicted least recently used entries");
        }
        self.stats.set_total_entries(self.entries.len());
        evicted
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("stats", &self.stats)
            .field("has_eviction_listener", &self.on_evict.is_some())
            .finish()
    }
}
