//! Bounded LRU memoization for classification and reply results.

use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

/// Capacity used when a caller passes zero.
const FALLBACK_CAPACITY: usize = 100;

/// Cache hit/miss counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

/// A fixed-capacity memoization table with least-recently-used eviction.
///
/// Insertion and every hit refresh recency. Entries live until evicted;
/// there is no TTL and no persistence across restarts.
///
/// Only oracle-sourced results belong in here: the owning service must not
/// insert fallback values computed under rate-limit denial or oracle failure,
/// otherwise a cached fallback would shadow a later admitted oracle answer
/// for the same text.
#[derive(Debug)]
pub struct ResultCache<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq, V: Clone> ResultCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity)
            .unwrap_or_else(|| NonZeroUsize::new(FALLBACK_CAPACITY).expect("nonzero literal"));
        Self {
            entries: LruCache::new(cap),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a key, refreshing its recency on hit.
    pub fn get(&mut self, key: &K) -> Option<V> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a computed result, evicting the least-recently-used entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.put(key, value);
    }

    /// Drop every entry (used between tests; the caches are otherwise process-lived).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            capacity: self.entries.cap().get(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}
