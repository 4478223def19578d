//! Generational Approximate-LRU Cache
//!
//! This module provides [`LruFastHashMap`], a cache that approximates LRU
//! eviction by splitting its capacity into a ring of equally sized
//! generations, each an open-addressing [`FastHashMap`].
//!
//! # Algorithm
//!
//! ```text
//!   capacity 12, 3 generations of 4
//!
//!   oldest                          current
//!   ┌─────────────┐ ┌─────────────┐ ┌─────────────┐
//!   │ 1  2  3  4  │ │ 5  6  7  8  │ │ 9 10 11 12  │
//!   └─────────────┘ └─────────────┘ └─────────────┘
//!
//!   get(1): hit in the oldest generation, copy 1 forward. The current
//!   generation is full, so the ring rotates first: the oldest generation is
//!   cleared in one step and becomes the new current one.
//!
//!   oldest                          current
//!   ┌─────────────┐ ┌─────────────┐ ┌─────────────┐
//!   │ 5  6  7  8  │ │ 9 10 11 12  │ │ 1           │
//!   └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! - Writes always go to the current generation. A key already in the current
//!   generation is overwritten in place; otherwise a full current generation
//!   rotates the ring before the write.
//! - Lookups search from the newest generation to the oldest. A hit outside
//!   the current generation is promoted: key and value are copied into the
//!   current generation exactly as `put` would write them.
//! - The older copy is left alone until its generation is dropped, so a key can
//!   briefly live in two generations and [`len`](LruFastHashMap::len) counts it
//!   twice.
//!
//! Recency is therefore tracked per generation, not per entry. Eviction never
//! walks a list: dropping a generation is a single `clear` of one table whose
//! allocation is reused.
//!
//! # Performance Characteristics
//!
//! - Get / Put: O(generations) probes in the worst case, O(1) for keys in the
//!   current generation
//! - Eviction: O(generation slots) per rotation, amortized O(1) per write
//!
//! # When to Use
//!
//! Good for lookup tables of derived values where exact LRU order does not
//! matter and a cheap hit path does. For exact order use
//! [`LruHashMap`](crate::LruHashMap) or [`LruList`](crate::LruList).
//!
//! # Thread Safety
//!
//! Not thread-safe. The `concurrent` feature provides `ConcurrentLruCache` with
//! the same semantics behind locks.

extern crate alloc;

use crate::config::{FastHashMapConfig, GenerationalCacheConfig};
use crate::error::ConfigError;
use crate::fast_map::FastHashMap;
use crate::metrics::{CacheMetrics, GenerationalCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Load factor of the per-generation tables.
const GENERATION_LOAD_FACTOR: f32 = 0.5;

/// A generational approximate-LRU cache built on [`FastHashMap`].
///
/// # Examples
///
/// ```
/// use gencache::LruFastHashMap;
/// use core::num::NonZeroUsize;
///
/// // 3 generations of 2 entries
/// let mut cache = LruFastHashMap::new(NonZeroUsize::new(6).unwrap());
/// cache.put("k11", 1);
/// cache.put("k12", 1);
/// cache.put("k21", 2);
/// cache.put("k22", 2);
/// cache.put("k31", 3);
/// cache.put("k32", 3);
///
/// // The next write drops the oldest generation as a whole
/// cache.put("k41", 4);
/// assert!(!cache.contains_key(&"k11"));
/// assert!(!cache.contains_key(&"k12"));
/// assert_eq!(cache.get(&"k21"), Some(&2));
/// ```
pub struct LruFastHashMap<K, V, S = DefaultHashBuilder> {
    config: GenerationalCacheConfig,
    generation_size: usize,
    ring: Vec<FastHashMap<K, V, S>>,
    current: usize,
    metrics: GenerationalCacheMetrics,
}

impl<K, V> LruFastHashMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a cache of `capacity` entries split into the default three
    /// generations.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is smaller than the generation count.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::init(GenerationalCacheConfig::new(capacity), None)
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; see [`try_init`](Self::try_init).
    pub fn init(config: GenerationalCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        match Self::try_init(config, hasher) {
            Ok(cache) => cache,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// Fails when fewer than two generations are configured or the capacity
    /// cannot give every generation at least one entry.
    pub fn try_init(
        config: GenerationalCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, ConfigError> {
        Self::try_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K, V, S> LruFastHashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Creates a cache with a custom hash builder, cloned into every generation.
    pub fn try_with_hasher(
        config: GenerationalCacheConfig,
        hash_builder: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let generation_size = config.generation_size();
        let table_config = FastHashMapConfig {
            initial_capacity: NonZeroUsize::new(generation_size).ok_or(
                ConfigError::CapacityTooSmall {
                    capacity: config.capacity.get(),
                    minimum: config.generations.get(),
                },
            )?,
            load_factor: GENERATION_LOAD_FACTOR,
        };

        let ring = (0..config.generations.get())
            .map(|_| FastHashMap::try_with_hasher(table_config, hash_builder.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LruFastHashMap {
            config,
            generation_size,
            ring,
            current: 0,
            metrics: GenerationalCacheMetrics::new(),
        })
    }

    /// Returns the configured total capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity.get()
    }

    /// Returns the number of entries a generation holds before rotating.
    #[inline]
    pub fn generation_size(&self) -> usize {
        self.generation_size
    }

    /// Returns the number of generations in the ring.
    #[inline]
    pub fn generations(&self) -> usize {
        self.ring.len()
    }

    /// Returns the number of stored entries across all generations.
    ///
    /// A promoted key whose older copy has not been dropped yet is counted
    /// once per copy.
    pub fn len(&self) -> usize {
        self.ring.iter().map(FastHashMap::len).sum()
    }

    /// Returns `true` if no generation holds an entry.
    pub fn is_empty(&self) -> bool {
        self.ring.iter().all(FastHashMap::is_empty)
    }

    /// Generation indices from the current one to the oldest.
    fn newest_first(&self) -> impl Iterator<Item = usize> {
        let n = self.ring.len();
        let current = self.current;
        (0..n).map(move |age| (current + n - age) % n)
    }

    fn find_generation<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.newest_first()
            .find(|&idx| self.ring[idx].contains_key(key))
    }

    /// Drops the oldest generation and makes it the current one.
    ///
    /// A copy of `carried` in the dropped generation is about to be rewritten
    /// into the new current one, so it does not count as an eviction.
    fn rotate(&mut self, carried: &K) {
        let oldest = (self.current + 1) % self.ring.len();
        let generation = &mut self.ring[oldest];
        let dropped = generation.len() - usize::from(generation.contains_key(carried));
        generation.clear();
        self.current = oldest;
        self.metrics.record_rotation(dropped as u64);
        log::debug!(
            "rotated to generation {}, evicted {} entries",
            oldest,
            dropped
        );
    }

    /// Writes into the current generation, rotating first if it is full.
    fn store(&mut self, key: K, value: V) -> Option<V> {
        let current = &mut self.ring[self.current];
        if current.contains_key(&key) {
            return current.put(key, value);
        }
        if current.len() >= self.generation_size {
            self.rotate(&key);
        }
        self.ring[self.current].put(key, value)
    }

    /// Inserts a key-value pair into the current generation.
    ///
    /// Returns the previously visible value for the key, if any. When that
    /// value lived in an older generation it is cloned, since the older copy
    /// stays in place until its generation is dropped.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let previous = match self.find_generation(&key) {
            Some(idx) if idx == self.current => None,
            Some(idx) => self.ring[idx].get(&key).cloned(),
            None => None,
        };

        match self.store(key, value) {
            Some(old) => {
                self.metrics.core.record_update();
                Some(old)
            }
            None if previous.is_some() => {
                self.metrics.core.record_update();
                previous
            }
            None => {
                self.metrics.core.record_insertion();
                None
            }
        }
    }

    /// Returns the value for `key`, promoting it into the current generation.
    ///
    /// Promotion may rotate the ring and drop the oldest generation, exactly
    /// as a `put` of the same key would.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = match self.find_generation(key) {
            Some(idx) => idx,
            None => {
                self.metrics.core.record_miss();
                return None;
            }
        };
        self.metrics.core.record_hit();

        if idx != self.current {
            let (k, v) = self.ring[idx]
                .get_key_value(key)
                .map(|(k, v)| (k.clone(), v.clone()))?;
            self.metrics.record_promotion();
            self.store(k, v);
        }

        self.ring[self.current].get(key)
    }

    /// Returns the newest value for `key` without promoting it.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.newest_first().find_map(|idx| self.ring[idx].get(key))
    }

    /// Returns `true` if any generation holds `key`. Never promotes.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_generation(key).is_some()
    }

    /// Removes every copy of `key`, returning the newest value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut newest = None;
        for idx in self.newest_first().collect::<Vec<_>>() {
            if let Some(value) = self.ring[idx].remove(key) {
                if newest.is_none() {
                    newest = Some(value);
                }
            }
        }
        if newest.is_some() {
            self.metrics.core.record_removal();
        }
        newest
    }

    /// Removes every entry from every generation.
    pub fn clear(&mut self) {
        for generation in self.ring.iter_mut() {
            generation.clear();
        }
        self.current = 0;
    }
}

impl<K, V, S> CacheMetrics for LruFastHashMap<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for LruFastHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruFastHashMap")
            .field("capacity", &self.config.capacity)
            .field("generations", &self.ring.len())
            .field("generation_size", &self.generation_size)
            .field("current", &self.current)
            .finish()
    }
}
