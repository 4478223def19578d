//! Size-Capped Ordered Map
//!
//! A hash map that remembers the order its entries were written in and keeps at
//! most `max_size` of them. Writing a new key beyond that size drops the oldest
//! surviving entry.
//!
//! # Eviction order
//!
//! By default age is the original insertion time: overwriting or reading a key
//! does not make it younger, so the map behaves as a FIFO with overwrite. This
//! is what callers that cap a table of derived lookups want, since a hot key
//! does not need its slot refreshed to stay correct. With
//! [`EvictionOrder::Access`] reads and overwrites move the key to the young end
//! and the map becomes an exact LRU.
//!
//! ```text
//! max_size = 3, Insertion order
//!
//! put(1) put(2) put(3)   [1, 2, 3]
//! put(1, new value)      [1, 2, 3]     age of 1 unchanged
//! put(4)                 [2, 3, 4]     1 is still the oldest and goes
//! ```
//!
//! # Performance Characteristics
//!
//! - Get / Put / Remove: O(1)
//! - Memory: one hash map slot plus one list node per entry; keys are stored
//!   twice, so `K: Clone` is required
//!
//! # Thread Safety
//!
//! Not thread-safe. Wrap it in a lock to share it between threads.

extern crate alloc;

use crate::config::{EvictionOrder, LruHashMapConfig};
use crate::list::{List, NodeRef};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// An insertion-ordered (or access-ordered) map capped at `max_size` entries.
///
/// # Examples
///
/// ```
/// use gencache::LruHashMap;
/// use core::num::NonZeroUsize;
///
/// let mut map = LruHashMap::new(NonZeroUsize::new(2).unwrap());
/// map.put("apple", 1);
/// map.put("banana", 2);
///
/// // Reading does not refresh age in the default insertion order
/// assert_eq!(map.get(&"apple"), Some(&1));
///
/// map.put("cherry", 3);
/// assert!(!map.contains_key(&"apple"));
/// assert_eq!(map.get(&"banana"), Some(&2));
/// assert_eq!(map.get(&"cherry"), Some(&3));
/// ```
pub struct LruHashMap<K, V, S = DefaultHashBuilder> {
    config: LruHashMapConfig,
    list: List<(K, V)>,
    map: HashMap<K, NodeRef, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq + Clone, V> LruHashMap<K, V> {
    /// Creates an insertion-ordered map holding at most `max_size` entries.
    pub fn new(max_size: NonZeroUsize) -> Self {
        Self::init(LruHashMapConfig::new(max_size), None)
    }

    /// Creates a map from a configuration with an optional hasher.
    pub fn init(config: LruHashMapConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_hasher(config, hasher.unwrap_or_default())
    }

    /// Creates an insertion-ordered map seeded from `entries`.
    ///
    /// Entries are written in iteration order; when there are more than
    /// `max_size` of them only the last `max_size` survive. Seeding is not
    /// counted in the metrics.
    pub fn with_entries<I>(max_size: NonZeroUsize, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new(max_size);
        for (key, value) in entries {
            map.put(key, value);
        }
        map.metrics = LruCacheMetrics::new();
        map
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruHashMap<K, V, S> {
    /// Creates a map with a custom hash builder.
    pub fn with_hasher(config: LruHashMapConfig, hash_builder: S) -> Self {
        let max_size = config.max_size.get();
        LruHashMap {
            config,
            list: List::with_capacity(max_size),
            map: HashMap::with_capacity_and_hasher(max_size, hash_builder),
            metrics: LruCacheMetrics::new(),
        }
    }

    #[inline]
    pub fn max_size(&self) -> NonZeroUsize {
        self.config.max_size
    }

    #[inline]
    pub fn order(&self) -> EvictionOrder {
        self.config.order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Inserts or overwrites a value, returning the previous one.
    ///
    /// A new key that pushes the map over `max_size` evicts the oldest entry.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&node) = self.map.get(&key) {
            if self.config.order == EvictionOrder::Access {
                self.list.move_to_back(node);
            }
            self.metrics.core.record_update();
            return self
                .list
                .get_mut(node)
                .map(|entry| core::mem::replace(&mut entry.1, value));
        }

        let node = self.list.push_back((key.clone(), value));
        self.map.insert(key, node);
        self.metrics.core.record_insertion();

        if self.map.len() > self.config.max_size.get() {
            if let Some((oldest, _)) = self.list.pop_front() {
                self.map.remove(&oldest);
                self.metrics.core.record_evictions(1);
            }
        }

        None
    }

    /// Returns the value for `key`.
    ///
    /// In [`EvictionOrder::Access`] mode the key becomes the youngest entry.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.touch(key) {
            Some(node) => self.list.get(node).map(|(_, v)| v),
            None => None,
        }
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// Refreshes age the same way [`get`](Self::get) does.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.touch(key) {
            Some(node) => self.list.get_mut(node).map(|(_, v)| v),
            None => None,
        }
    }

    /// Records the lookup and applies the eviction order to a hit.
    fn touch<Q>(&mut self, key: &Q) -> Option<NodeRef>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(node) => {
                self.metrics.core.record_hit();
                if self.config.order == EvictionOrder::Access {
                    self.list.move_to_back(node);
                }
                Some(node)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Returns `true` if the map holds `key`. Never changes age.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.remove(key)?;
        self.metrics.core.record_removal();
        self.list.remove(node).map(|(_, v)| v)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    /// Iterates from the oldest entry to the youngest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.list.iter().map(|(k, v)| (k, v))
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for LruHashMap<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> fmt::Debug for LruHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruHashMap")
            .field("max_size", &self.config.max_size)
            .field("order", &self.config.order)
            .field("len", &self.list.len())
            .finish()
    }
}
