//! CLOCK (Second Chance) Map Implementation
//!
//! A bounded map that approximates LRU without any ordering structure. Every
//! entry carries a single "second chance" bit that is set whenever the entry is
//! written or read. When an insert pushes the map over its size limit, a clock
//! hand sweeps the slot table: entries with the bit set lose it and are
//! skipped, the first entry found without it is evicted.
//!
//! # Layout
//!
//! Entries live directly in a linear-probing slot table sized for a one third
//! load factor. The hand is simply a slot index that keeps moving forward
//! between evictions:
//!
//! ```text
//!              hand
//!               ▼
//! ┌──────┬──────┬──────┬──────┬──────┬──────┬──────┬──────┐
//! │ a:1  │ Free │ b:0  │ c:1  │ Free │ d:0  │ Free │ e:1  │
//! └──────┴──────┴──────┴──────┴──────┴──────┴──────┴──────┘
//!   next eviction: b (c loses its bit first if b was read meanwhile)
//! ```
//!
//! Removing an entry re-inserts every entry that follows it up to the next
//! free slot, so probe chains never contain holes and no tombstones are needed.
//!
//! # Performance Characteristics
//!
//! | Metric | Value |
//! |--------|-------|
//! | Get/Put/Remove | O(1) expected |
//! | Eviction | amortized O(1), one lap of the table worst case |
//! | Memory per entry | key + value + one bool, three slots per entry |
//!
//! # When to Use
//!
//! **Use ClockMap when:**
//! - Reads dominate and should cost no more than a hash lookup and a bit write
//! - A rough recency order is acceptable
//!
//! **Consider alternatives when:**
//! - You need a deterministic eviction order → use `LruHashMap`
//! - You share the cache between threads → use `ConcurrentLruCache`
//!
//! # Thread Safety
//!
//! Not thread-safe. Wrap it in a lock to share it between threads.

extern crate alloc;

use crate::config::ClockMapConfig;
use crate::error::ConfigError;
use crate::fast_map::table_size;
use crate::metrics::{CacheMetrics, ClockCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Smallest `max_size` a [`ClockMap`] accepts.
pub const MIN_CLOCK_SIZE: usize = 4;

/// Load factor the slot table is sized for.
const CLOCK_LOAD_FACTOR: f32 = 0.3333;

struct Entry<K, V> {
    key: K,
    value: V,
    second_chance: bool,
}

fn empty_slots<K, V>(count: usize) -> Vec<Option<Entry<K, V>>> {
    let mut slots = Vec::with_capacity(count);
    slots.resize_with(count, || None);
    slots
}

/// A bounded map with CLOCK (second chance) eviction.
///
/// # Examples
///
/// ```
/// use gencache::ClockMap;
/// use core::num::NonZeroUsize;
///
/// let mut map = ClockMap::new(NonZeroUsize::new(4).unwrap());
/// for i in 0..10 {
///     map.put(i, i * 10);
/// }
/// assert_eq!(map.len(), 4);
/// assert_eq!(map.get(&9), Some(&90));
/// ```
pub struct ClockMap<K, V, S = DefaultHashBuilder> {
    config: ClockMapConfig,
    slots: Vec<Option<Entry<K, V>>>,
    mask: usize,
    len: usize,
    hand: usize,
    metrics: ClockCacheMetrics,
    hash_builder: S,
}

impl<K: Hash + Eq, V> ClockMap<K, V> {
    /// Creates a map holding at most `max_size` entries.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is below [`MIN_CLOCK_SIZE`].
    pub fn new(max_size: NonZeroUsize) -> Self {
        Self::init(ClockMapConfig { max_size }, None)
    }

    /// Creates a map from a configuration with an optional hasher.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; see [`try_init`](Self::try_init).
    pub fn init(config: ClockMapConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        match Self::try_init(config, hasher) {
            Ok(map) => map,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates a map from a configuration with an optional hasher.
    ///
    /// Fails with [`ConfigError::CapacityTooSmall`] when `max_size` is below
    /// [`MIN_CLOCK_SIZE`].
    pub fn try_init(
        config: ClockMapConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, ConfigError> {
        Self::try_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> ClockMap<K, V, S> {
    /// Creates a map with a custom hash builder.
    pub fn try_with_hasher(config: ClockMapConfig, hash_builder: S) -> Result<Self, ConfigError> {
        let max_size = config.max_size.get();
        if max_size < MIN_CLOCK_SIZE {
            return Err(ConfigError::CapacityTooSmall {
                capacity: max_size,
                minimum: MIN_CLOCK_SIZE,
            });
        }

        let slot_count = table_size(max_size, CLOCK_LOAD_FACTOR)?;
        Ok(ClockMap {
            config,
            slots: empty_slots(slot_count),
            mask: slot_count - 1,
            len: 0,
            // The first sweep starts at slot 0
            hand: slot_count - 1,
            metrics: ClockCacheMetrics::new(),
            hash_builder,
        })
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn max_size(&self) -> NonZeroUsize {
        self.config.max_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the slot table.
    #[inline]
    pub fn slot_capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn home<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hash_builder.hash_one(key) as usize) & self.mask
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut idx = self.home(key);
        for _ in 0..self.slots.len() {
            match &self.slots[idx] {
                None => return None,
                Some(entry) if entry.key.borrow() == key => return Some(idx),
                Some(_) => {}
            }
            idx = (idx + 1) & self.mask;
        }
        None
    }

    /// Places an entry in the first free slot of its probe chain.
    ///
    /// The table holds at most `max_size + 1` entries in three times as many
    /// slots, so a free slot always exists.
    fn place(&mut self, entry: Entry<K, V>) {
        let mut idx = self.home(&entry.key);
        while self.slots[idx].is_some() {
            idx = (idx + 1) & self.mask;
        }
        self.slots[idx] = Some(entry);
    }

    /// Empties `idx` and re-places the rest of its chain.
    fn take_and_shift(&mut self, idx: usize) -> Option<Entry<K, V>> {
        let taken = self.slots[idx].take()?;
        self.len -= 1;

        let mut next = (idx + 1) & self.mask;
        while let Some(entry) = self.slots[next].take() {
            self.place(entry);
            next = (next + 1) & self.mask;
        }
        Some(taken)
    }

    /// Advances the hand until an entry without a second chance is found and
    /// evicts it.
    fn evict(&mut self) {
        loop {
            self.hand = (self.hand + 1) & self.mask;
            self.metrics.hand_steps += 1;

            let had_chance = match &mut self.slots[self.hand] {
                None => continue,
                Some(entry) => mem::replace(&mut entry.second_chance, false),
            };
            if had_chance {
                self.metrics.second_chances_revoked += 1;
                continue;
            }

            let hand = self.hand;
            if self.take_and_shift(hand).is_some() {
                self.metrics.core.record_evictions(1);
                log::trace!("clock hand evicted slot {}", hand);
            }
            return;
        }
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// New and overwritten entries get their second chance bit set. If the
    /// insert pushes the map over `max_size`, one entry is evicted.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(idx) = self.find(&key) {
            if let Some(entry) = &mut self.slots[idx] {
                entry.second_chance = true;
                self.metrics.core.record_update();
                return Some(mem::replace(&mut entry.value, value));
            }
        }

        self.place(Entry {
            key,
            value,
            second_chance: true,
        });
        self.len += 1;
        self.metrics.core.record_insertion();

        if self.len > self.config.max_size.get() {
            self.evict();
        }
        None
    }

    /// Returns the value for `key` and gives the entry a second chance.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(idx) = self.find(key) else {
            self.metrics.core.record_miss();
            return None;
        };
        self.metrics.core.record_hit();
        let entry = self.slots[idx].as_mut()?;
        entry.second_chance = true;
        Some(&entry.value)
    }

    /// Returns the value for `key` without touching its second chance bit.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(key)?;
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).is_some()
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(key)?;
        let entry = self.take_and_shift(idx)?;
        self.metrics.core.record_removal();
        Some(entry.value)
    }

    /// Removes all entries, keeping the slot table.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    /// Iterates over the keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterates over the entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().map(|entry| (&entry.key, &entry.value)))
    }
}

impl<K, V, S> CacheMetrics for ClockMap<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ClockMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<_> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                slot.as_ref()
                    .map(|e| (idx, &e.key, &e.value, e.second_chance))
            })
            .collect();
        f.debug_struct("ClockMap")
            .field("max_size", &self.config.max_size)
            .field("len", &self.len)
            .field("hand", &self.hand)
            .field("entries", &entries)
            .finish()
    }
}
