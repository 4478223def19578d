//! Concurrent Generational LRU Cache Implementation
//!
//! A thread-safe generational cache with the same observable semantics as
//! [`LruFastHashMap`](crate::LruFastHashMap): a ring of equally sized
//! generations, writes into the current one, promotion of older hits and bulk
//! eviction of the oldest generation.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      ConcurrentLruCache                              │
//! │                                                                      │
//! │  RwLock<Generations>   shared: get / put / remove / promote          │
//! │          │             exclusive: rotate / clear                     │
//! │          ▼                                                           │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐                  │
//! │  │ Generation 0 │ │ Generation 1 │ │ Generation 2 │ ◀── current      │
//! │  │  ┌────────┐  │ │  ┌────────┐  │ │  ┌────────┐  │                  │
//! │  │  │ RwLock │  │ │  │ RwLock │  │ │  │ RwLock │  │                  │
//! │  │  └────┬───┘  │ │  └────┬───┘  │ │  └────┬───┘  │                  │
//! │  │  ┌────▼───┐  │ │  ┌────▼───┐  │ │  ┌────▼───┐  │                  │
//! │  │  │HashMap │  │ │  │HashMap │  │ │  │HashMap │  │                  │
//! │  │  └────────┘  │ │  └────────┘  │ │  └────────┘  │                  │
//! │  └──────────────┘ └──────────────┘ └──────────────┘                  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lock order is always list lock first, then at most one generation lock at a
//! time. A thread that finds the current generation full releases both and
//! takes the list lock exclusively to rotate; after acquiring it, it checks
//! again whether the current generation is still full, so concurrent writers
//! that raced to the same rotation perform it once.
//!
//! # Performance Characteristics
//!
//! | Metric | Value |
//! |--------|-------|
//! | Get/Put/Remove | O(generations) hash lookups |
//! | Rotation | O(generation size), once per `generation_size` new keys |
//! | Memory overhead | one RwLock per generation plus one for the list |
//!
//! # When to Use
//!
//! **Use ConcurrentLruCache when:**
//! - Many threads read a shared set of hot keys
//! - Approximate recency is good enough
//!
//! **Consider alternatives when:**
//! - Single-threaded access only → use `LruFastHashMap`
//! - Exact eviction order matters → use `LruHashMap` behind a lock

extern crate alloc;

use crate::config::GenerationalCacheConfig;
use crate::error::ConfigError;
use crate::metrics::{AtomicGenerationalMetrics, CacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::RwLock;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Smallest capacity a [`ConcurrentLruCache`] accepts.
pub const MIN_CAPACITY: usize = 10;

/// The ring of generations and the index of the current one.
struct Generations<K, V, S> {
    ring: Vec<RwLock<HashMap<K, V, S>>>,
    current: usize,
}

impl<K, V, S> Generations<K, V, S> {
    /// Generation indices from the current one to the oldest.
    fn newest_first(&self) -> impl Iterator<Item = usize> {
        let n = self.ring.len();
        let current = self.current;
        (0..n).map(move |age| (current + n - age) % n)
    }
}

/// A thread-safe generational approximate-LRU cache.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone + Send + Sync`.
/// - `V`: Value type. Must implement `Clone + Send + Sync`.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```
/// use gencache::concurrent::ConcurrentLruCache;
///
/// let cache = ConcurrentLruCache::new(12);
/// for i in 1..=12 {
///     cache.put(i, i);
/// }
///
/// // Reading 1 promotes it; the full current generation rotates and the
/// // oldest generation (1 to 4) is dropped as a whole
/// assert_eq!(cache.get(&1), Some(1));
/// assert_eq!(cache.len(), 9);
/// assert!(!cache.contains_key(&2));
/// ```
pub struct ConcurrentLruCache<K, V, S = DefaultHashBuilder> {
    config: GenerationalCacheConfig,
    generation_size: usize,
    generations: RwLock<Generations<K, V, S>>,
    metrics: AtomicGenerationalMetrics,
}

impl<K, V> ConcurrentLruCache<K, V, DefaultHashBuilder>
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Creates a cache of `capacity` entries in the default three generations.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is below [`MIN_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates a cache of `capacity` entries in the default three generations.
    ///
    /// Fails with [`ConfigError::CapacityTooSmall`] below [`MIN_CAPACITY`].
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(ConfigError::CapacityTooSmall {
            capacity,
            minimum: MIN_CAPACITY,
        })?;
        Self::try_init(GenerationalCacheConfig::new(capacity), None)
    }

    /// Creates a cache from a configuration with an optional hasher.
    pub fn try_init(
        config: GenerationalCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, ConfigError> {
        Self::try_with_hasher(config, hasher.unwrap_or_default())
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
}

impl<K, V, S> ConcurrentLruCache<K, V, S>
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Clone + Send + Sync,
    S: BuildHasher + Clone + Send + Sync,
{
    /// Creates a cache with a custom hash builder, cloned into every generation.
    pub fn try_with_hasher(
        config: GenerationalCacheConfig,
        hash_builder: S,
    ) -> Result<Self, ConfigError> {
        if config.capacity.get() < MIN_CAPACITY {
            return Err(ConfigError::CapacityTooSmall {
                capacity: config.capacity.get(),
                minimum: MIN_CAPACITY,
            });
        }
        config.validate()?;

        let generation_size = config.generation_size();
        let ring = (0..config.generations.get())
            .map(|_| {
                RwLock::new(HashMap::with_capacity_and_hasher(
                    generation_size,
                    hash_builder.clone(),
                ))
            })
            .collect();

        Ok(ConcurrentLruCache {
            config,
            generation_size,
            generations: RwLock::new(Generations { ring, current: 0 }),
            metrics: AtomicGenerationalMetrics::new(),
        })
    }

    /// Returns the configured total capacity.
    pub fn capacity(&self) -> usize {
        self.config.capacity.get()
    }

    /// Returns the number of entries a generation holds before rotating.
    pub fn generation_size(&self) -> usize {
        self.generation_size
    }

    /// Returns the number of generations in the ring.
    pub fn generations(&self) -> usize {
        self.config.generations.get()
    }

    /// Returns the number of stored entries across all generations.
    ///
    /// Generations are counted one after another, so the value may be stale
    /// under concurrent writes. Promoted keys whose older copy still exists
    /// are counted once per copy.
    pub fn len(&self) -> usize {
        let gens = self.generations.read();
        gens.ring.iter().map(|g| g.read().len()).sum()
    }

    /// Returns `true` if no generation holds an entry.
    pub fn is_empty(&self) -> bool {
        let gens = self.generations.read();
        gens.ring.iter().all(|g| g.read().is_empty())
    }

    /// Rotates the ring if the current generation is still full.
    ///
    /// A copy of `carried` in the dropped generation is about to be rewritten
    /// into the new current one, so it does not count as an eviction.
    fn rotate_if_full(&self, carried: &K) {
        let mut gens = self.generations.write();
        let current = gens.current;
        if gens.ring[current].get_mut().len() < self.generation_size {
            return;
        }

        let oldest = (current + 1) % gens.ring.len();
        let oldest_generation = gens.ring[oldest].get_mut();
        let dropped =
            oldest_generation.len() - usize::from(oldest_generation.contains_key(carried));
        oldest_generation.clear();
        gens.current = oldest;

        self.metrics.record_rotation(dropped as u64);
        log::debug!(
            "rotated to generation {}, evicted {} entries",
            oldest,
            dropped
        );
    }

    /// Writes into the current generation, rotating first if it is full.
    ///
    /// Returns the value replaced in the current generation, if any.
    fn store(&self, key: K, value: V) -> Option<V> {
        loop {
            {
                let gens = self.generations.read();
                let mut current = gens.ring[gens.current].write();
                if current.len() < self.generation_size || current.contains_key(&key) {
                    return current.insert(key, value);
                }
            }
            self.rotate_if_full(&key);
        }
    }

    /// Finds `key` newest-first and applies `f` to the first match.
    ///
    /// The closure learns whether the match is in the current generation.
    fn find_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&K, &V, bool) -> R,
    {
        let gens = self.generations.read();
        for idx in gens.newest_first() {
            let generation = gens.ring[idx].read();
            if let Some((k, v)) = generation.get_key_value(key) {
                return Some(f(k, v, idx == gens.current));
            }
        }
        None
    }

    /// Retrieves a value from the cache.
    ///
    /// Returns a **clone** of the value. A hit outside the current generation
    /// is promoted into it, which may rotate the ring.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_with(key, V::clone)
    }

    /// Retrieves a value and applies a function to it.
    ///
    /// For a hit in the current generation `f` runs while the generation's read
    /// lock is held and nothing is cloned. An older hit is cloned for the
    /// promotion anyway, and `f` runs on that copy after the locks are released.
    ///
    /// `f` must not call back into this cache. Writers block on the held read
    /// locks, so a `put`, `remove` or `clear` from inside `f` deadlocks.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        enum Found<K, V, R, F> {
            Current(R),
            Older(K, V, F),
        }

        let found = self.find_with(key, move |k, v, in_current| {
            if in_current {
                Found::Current(f(v))
            } else {
                Found::Older(k.clone(), v.clone(), f)
            }
        });

        match found {
            Some(Found::Current(result)) => {
                self.metrics.record_hit();
                Some(result)
            }
            Some(Found::Older(k, v, f)) => {
                self.metrics.record_hit();
                self.metrics.record_promotion();
                let result = f(&v);
                self.store(k, v);
                Some(result)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    /// Returns a clone of the newest value for `key` without promoting it.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_with(key, |_, v, _| v.clone())
    }

    /// Returns `true` if any generation holds `key`. Never promotes.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_with(key, |_, _, _| ()).is_some()
    }

    /// Inserts a key-value pair into the current generation.
    ///
    /// Returns the previously visible value for the key, cloned if it lived
    /// in an older generation.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let older = self
            .find_with(&key, |_, v, in_current| (!in_current).then(|| v.clone()))
            .flatten();

        match self.store(key, value) {
            Some(old) => {
                self.metrics.record_update();
                Some(old)
            }
            None if older.is_some() => {
                self.metrics.record_update();
                older
            }
            None => {
                self.metrics.record_insertion();
                None
            }
        }
    }

    /// Removes every copy of `key`, returning the newest value.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let gens = self.generations.read();
        let mut newest = None;
        for idx in gens.newest_first() {
            if let Some(value) = gens.ring[idx].write().remove(key) {
                if newest.is_none() {
                    newest = Some(value);
                }
            }
        }
        if newest.is_some() {
            self.metrics.record_removal();
        }
        newest
    }

    /// Removes all entries from all generations.
    pub fn clear(&self) {
        let mut gens = self.generations.write();
        for generation in gens.ring.iter_mut() {
            generation.get_mut().clear();
        }
        gens.current = 0;
    }
}

impl<K, V, S> CacheMetrics for ConcurrentLruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.snapshot().to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "CONCURRENT-GENERATIONAL"
    }
}

impl<K, V, S> core::fmt::Debug for ConcurrentLruCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentLruCache")
            .field("capacity", &self.config.capacity)
            .field("generations", &self.config.generations)
            .field("generation_size", &self.generation_size)
            .finish()
    }
}
