//! Generational Cache Metrics
//!
//! Metrics for [`LruFastHashMap`](crate::LruFastHashMap) and the thread-safe
//! `ConcurrentLruCache`. On top of the core counters a generational cache
//! reports:
//!
//! - **promotions**: hits outside the current generation that were copied
//!   forward. A high promotion rate relative to hits means the working set is
//!   larger than one generation.
//! - **rotations**: how often the oldest generation was dropped. Every entry
//!   still in that generation counts as an eviction, except a copy of the key
//!   whose write triggered the rotation.
//!
//! The concurrent cache cannot take `&mut self` on lookups, so it counts with
//! [`AtomicGenerationalMetrics`] and converts to the plain struct on demand.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a generational approximate-LRU cache
#[derive(Debug, Default, Clone)]
pub struct GenerationalCacheMetrics {
    /// Core metrics common to all caches
    pub core: CoreCacheMetrics,

    /// Hits outside the current generation that were copied into it
    pub promotions: u64,

    /// Number of times the oldest generation was dropped
    pub rotations: u64,
}

impl GenerationalCacheMetrics {
    /// Creates an empty set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a promotion of an older copy into the current generation.
    #[inline]
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Records a rotation that evicted `dropped` entries.
    #[inline]
    pub fn record_rotation(&mut self, dropped: u64) {
        self.rotations += 1;
        self.core.record_evictions(dropped);
    }

    /// Converts the metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics.insert("rotations".to_string(), self.rotations as f64);
        if self.core.cache_hits > 0 {
            metrics.insert(
                "promotion_rate".to_string(),
                self.promotions as f64 / self.core.cache_hits as f64,
            );
        }
        metrics
    }
}

impl CacheMetrics for GenerationalCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "GENERATIONAL"
    }
}

/// Lock-free counters for caches that are read through `&self`.
#[derive(Debug, Default)]
pub struct AtomicGenerationalMetrics {
    requests: AtomicU64,
    cache_hits: AtomicU64,
    insertions: AtomicU64,
    updates: AtomicU64,
    evictions: AtomicU64,
    removals: AtomicU64,
    promotions: AtomicU64,
    rotations: AtomicU64,
}

impl AtomicGenerationalMetrics {
    /// Creates an empty set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found an entry.
    #[inline]
    pub fn record_hit(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that found nothing.
    #[inline]
    pub fn record_miss(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a write of a new key.
    #[inline]
    pub fn record_insertion(&self) {
        self.insertions.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a write that replaced the visible value of a key.
    #[inline]
    pub fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an explicit removal.
    #[inline]
    pub fn record_removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a promotion of an older copy into the current generation.
    #[inline]
    pub fn record_promotion(&self) {
        self.promotions.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a rotation that evicted `dropped` entries.
    #[inline]
    pub fn record_rotation(&self, dropped: u64) {
        self.rotations.fetch_add(1, Ordering::Relaxed);
        self.evictions.fetch_add(dropped, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of the counters.
    ///
    /// Counters are read one by one, so a snapshot taken under load may mix
    /// values from slightly different moments.
    pub fn snapshot(&self) -> GenerationalCacheMetrics {
        GenerationalCacheMetrics {
            core: CoreCacheMetrics {
                requests: self.requests.load(Ordering::Relaxed),
                cache_hits: self.cache_hits.load(Ordering::Relaxed),
                insertions: self.insertions.load(Ordering::Relaxed),
                updates: self.updates.load(Ordering::Relaxed),
                evictions: self.evictions.load(Ordering::Relaxed),
                removals: self.removals.load(Ordering::Relaxed),
            },
            promotions: self.promotions.load(Ordering::Relaxed),
            rotations: self.rotations.load(Ordering::Relaxed),
        }
    }
}
