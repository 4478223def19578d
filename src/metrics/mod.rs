//! Cache Metrics System
//!
//! Provides a flexible metrics system for the caches using BTreeMap-based
//! metrics reporting. Each cache tracks its own specific counters while
//! implementing a common [`CacheMetrics`] trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap gives deterministic ordering, so metric dumps from two runs (or two
//! cache types) line up key by key in logs and test assertions. With a dozen
//! keys the O(log n) lookup cost does not matter.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod clock;
pub mod generational;
pub mod lru;

pub use clock::ClockCacheMetrics;
pub use generational::{AtomicGenerationalMetrics, GenerationalCacheMetrics};
pub use lru::LruCacheMetrics;

/// Common metrics tracked by all caches
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of lookups made against the cache
    pub requests: u64,

    /// Number of lookups that found an entry
    pub cache_hits: u64,

    /// Number of entries written for keys that were not present
    pub insertions: u64,

    /// Number of values replaced in place for keys that were present
    pub updates: u64,

    /// Number of entries dropped because of capacity pressure
    pub evictions: u64,

    /// Number of entries deleted by explicit `remove` calls
    pub removals: u64,
}

impl CoreCacheMetrics {
    /// Creates an empty set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found an entry.
    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that found nothing.
    ///
    /// Misses are reported as `requests - cache_hits`.
    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a write of a new key.
    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a write that replaced the value of an existing key.
    #[inline]
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records `count` entries dropped by capacity pressure.
    #[inline]
    pub fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    /// Records an explicit removal.
    #[inline]
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Calculates the hit rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no lookups have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates the miss rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no lookups have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert(
            "cache_misses".to_string(),
            (self.requests - self.cache_hits) as f64,
        );
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_ratio".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Trait that all caches implement for metrics reporting
///
/// Gives a uniform interface for pulling counters out of any cache in this
/// crate, so callers can compare eviction strategies side by side.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification
    fn algorithm_name(&self) -> &'static str;
}
