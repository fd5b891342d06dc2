//! Shared Cache Module
//!
//! Cloneable handle that lets many tasks use one [`LruCache`].

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{CacheStats, LruCache};

// == Shared Cache ==
/// Thread-safe handle to an [`LruCache`].
///
/// A single mutex guards the map and the recency list together, since even a
/// `get` reorders entries. Reads hand back clones so no borrow outlives the lock.
///
/// ```
/// use station_cache::cache::SharedCache;
///
/// tokio_test::block_on(async {
///     let cache = SharedCache::new(2);
///     cache.set("KJFK".to_string(), 13.0_f64).await;
///     assert_eq!(cache.get("KJFK").await, Some(13.0));
///     assert!(!cache.has("KLAX").await);
/// });
/// ```
#[derive(Debug)]
pub struct SharedCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a shared cache holding at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self::from_cache(LruCache::new(max_size))
    }

    /// Wraps an already configured cache, e.g. one with an eviction listener.
    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().await.get(key).cloned()
    }

    pub async fn set(&self, key: K, value: V) {
        self.inner.lock().await.set(key, value);
    }

    pub async fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.has(key)
    }

    pub async fn delete<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().await.delete(key)
    }

    pub async fn keys(&self) -> Vec<K> {
        self.inner.lock().await.keys()
    }

    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    // == With Lock ==
    /// Runs `f` with exclusive access, for compound operations that must not
    /// interleave with other tasks.
    pub async fn with_lock<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }
}
