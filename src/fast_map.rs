//! Open-Addressing Hash Map
//!
//! A hash table that stores its entries directly in one slot array and resolves
//! collisions by linear probing. It is the building block of the generational
//! caches: a whole table can be emptied in one pass without touching per-entry
//! links, and lookups touch a single contiguous allocation.
//!
//! # Layout
//!
//! ```text
//! slot:   0      1        2         3      4        5      6      7
//!       ┌──────┬────────┬─────────┬──────┬────────┬──────┬──────┬──────┐
//!       │ Free │ (k1,v) │ Removed │(k9,v)│ (k2,v) │ Free │ Free │ Free │
//!       └──────┴────────┴─────────┴──────┴────────┴──────┴──────┴──────┘
//!                 ▲ hash(k1) & mask = 1, probe for k9 starts at 1 and
//!                   walks 1 → 2 → 3; the tombstone at 2 keeps the chain
//!                   intact until a Free slot ends it
//! ```
//!
//! A probe starts at `hash & mask` and continues through occupied slots and
//! tombstones until it finds the key or a free slot. Any number of keys may
//! share a hash: they simply form a longer chain.
//!
//! # Growth
//!
//! Live entries and tombstones together may occupy at most `slots *
//! load_factor` slots (and never every slot, so a miss always terminates).
//! Before a new key would cross that threshold the table is rebuilt: doubled
//! when live entries need the room, rebuilt at the same size when the space is
//! mostly taken by tombstones.
//!
//! # Performance Characteristics
//!
//! - Get / Put / Remove: O(1) expected, O(chain length) worst case
//! - Rebuild: O(slots), amortized O(1) per insertion
//!
//! # Thread Safety
//!
//! Not thread-safe. Wrap it in a lock to share it between threads.

extern crate alloc;

use crate::config::FastHashMapConfig;
use crate::error::ConfigError;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Largest slot table the map accepts at construction time.
pub const MAX_SLOTS: usize = 1 << 30;

/// State of a single slot.
enum Slot<K, V> {
    /// Never used since the last rebuild; ends every probe chain.
    Free,
    /// Tombstone of a removed entry; probe chains continue past it.
    Removed,
    Occupied(K, V),
}

impl<K, V> Slot<K, V> {
    #[inline]
    fn is_free(&self) -> bool {
        matches!(self, Slot::Free)
    }
}

/// Number of slots needed to hold `expected` entries below `load_factor`.
///
/// The result is a power of two, at least 2.
pub(crate) fn table_size(expected: usize, load_factor: f32) -> Result<usize, ConfigError> {
    if !(load_factor > 0.0 && load_factor < 1.0) {
        return Err(ConfigError::InvalidLoadFactor(load_factor));
    }

    let exact = expected as f64 / load_factor as f64;
    let mut wanted = exact as u64;
    if (wanted as f64) < exact {
        wanted += 1;
    }

    match wanted.max(2).checked_next_power_of_two() {
        Some(slots) if slots <= MAX_SLOTS as u64 => Ok(slots as usize),
        _ => Err(ConfigError::TableTooLarge {
            expected,
            load_factor,
        }),
    }
}

/// Used-slot limit for a table of `slots` slots. Always leaves one slot free.
fn threshold_for(slots: usize, load_factor: f32) -> usize {
    ((slots as f32 * load_factor) as usize).clamp(1, slots - 1)
}

fn free_slots<K, V>(count: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(count);
    slots.resize_with(count, || Slot::Free);
    slots
}

/// An open-addressing hash map with linear probing.
///
/// # Examples
///
/// ```
/// use gencache::FastHashMap;
///
/// let mut map = FastHashMap::new();
/// assert_eq!(map.put("a", 1), None);
/// assert_eq!(map.put("a", 2), Some(1));
/// assert_eq!(map.get(&"a"), Some(&2));
/// assert_eq!(map.remove(&"a"), Some(2));
/// assert!(map.is_empty());
/// ```
pub struct FastHashMap<K, V, S = DefaultHashBuilder> {
    slots: Vec<Slot<K, V>>,
    mask: usize,
    len: usize,
    tombstones: usize,
    threshold: usize,
    load_factor: f32,
    hash_builder: S,
}

impl<K: Hash + Eq, V> FastHashMap<K, V> {
    /// Creates an empty map sized for 13 entries at a 0.5 load factor.
    pub fn new() -> Self {
        Self::init(FastHashMapConfig::default(), None)
    }

    /// Creates a map from a configuration with an optional hasher.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; see [`try_init`](Self::try_init).
    pub fn init(config: FastHashMapConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        match Self::try_init(config, hasher) {
            Ok(map) => map,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates a map from a configuration with an optional hasher.
    ///
    /// Fails with [`ConfigError::InvalidLoadFactor`] when the load factor is
    /// outside `(0, 1)` and [`ConfigError::TableTooLarge`] when the table for
    /// `initial_capacity` would exceed [`MAX_SLOTS`] slots.
    pub fn try_init(
        config: FastHashMapConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> Result<Self, ConfigError> {
        Self::try_with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V> Default for FastHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> FastHashMap<K, V, S> {
    /// Creates a map with a custom hash builder.
    pub fn try_with_hasher(config: FastHashMapConfig, hash_builder: S) -> Result<Self, ConfigError> {
        let slots = table_size(config.initial_capacity.get(), config.load_factor)?;
        Ok(FastHashMap {
            slots: free_slots(slots),
            mask: slots - 1,
            len: 0,
            tombstones: 0,
            threshold: threshold_for(slots, config.load_factor),
            load_factor: config.load_factor,
            hash_builder,
        })
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no entries.
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
    fn start_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hash_builder.hash_one(key) as usize) & self.mask
    }

    /// Finds the slot holding `key`.
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut idx = self.start_index(key);
        for _ in 0..self.slots.len() {
            match &self.slots[idx] {
                Slot::Free => return None,
                Slot::Occupied(k, _) if k.borrow() == key => return Some(idx),
                _ => {}
            }
            idx = (idx + 1) & self.mask;
        }
        None
    }

    /// Writes a key known to be absent into the first reusable slot of its chain.
    fn insert_absent(&mut self, key: K, value: V) {
        let mut idx = self.start_index(&key);
        loop {
            match self.slots[idx] {
                Slot::Free => break,
                Slot::Removed => {
                    self.tombstones -= 1;
                    break;
                }
                Slot::Occupied(..) => idx = (idx + 1) & self.mask,
            }
        }
        self.slots[idx] = Slot::Occupied(key, value);
    }

    /// Rebuilds the table into `slot_count` slots, dropping every tombstone.
    fn rebuild(&mut self, slot_count: usize) {
        let old = mem::replace(&mut self.slots, free_slots(slot_count));
        self.mask = slot_count - 1;
        self.threshold = threshold_for(slot_count, self.load_factor);
        self.tombstones = 0;

        for slot in old {
            if let Slot::Occupied(key, value) = slot {
                self.insert_absent(key, value);
            }
        }
    }

    /// Makes room for one more key below the threshold.
    fn reserve_one(&mut self) {
        if self.len + self.tombstones < self.threshold {
            return;
        }

        let slots = self.slots.len();
        let new_slots = if self.len + 1 > self.threshold / 2 {
            slots * 2
        } else {
            slots
        };

        log::debug!(
            "rebuilding table: {} slots -> {} slots ({} live, {} tombstones)",
            slots,
            new_slots,
            self.len,
            self.tombstones
        );
        self.rebuild(new_slots);
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(idx) = self.find(&key) {
            if let Slot::Occupied(_, v) = &mut self.slots[idx] {
                return Some(mem::replace(v, value));
            }
        }

        self.reserve_one();
        self.insert_absent(key, value);
        self.len += 1;
        None
    }

    /// Returns a reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(key)?;
        match &self.slots[idx] {
            Slot::Occupied(k, v) => Some((k, v)),
            _ => None,
        }
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(key)?;
        match &mut self.slots[idx] {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    /// Returns `true` if the map holds `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(key).is_some()
    }

    /// Removes `key`, returning its value.
    ///
    /// The slot becomes free when the next slot is free, otherwise it turns
    /// into a tombstone. Tombstones directly in front of a freed slot end no
    /// chain anymore and are freed as well.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find(key)?;
        let next = (idx + 1) & self.mask;

        let old = if self.slots[next].is_free() {
            let old = mem::replace(&mut self.slots[idx], Slot::Free);
            let mut prev = idx.wrapping_sub(1) & self.mask;
            while matches!(self.slots[prev], Slot::Removed) {
                self.slots[prev] = Slot::Free;
                self.tombstones -= 1;
                prev = prev.wrapping_sub(1) & self.mask;
            }
            old
        } else {
            self.tombstones += 1;
            mem::replace(&mut self.slots[idx], Slot::Removed)
        };

        self.len -= 1;
        match old {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }
}

impl<K, V, S> FastHashMap<K, V, S> {
    /// Removes every entry, keeping the slot table.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Free;
        }
        self.len = 0;
        self.tombstones = 0;
    }

    /// Iterates over all entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    /// Iterates over all keys in slot order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates over all values in slot order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for FastHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a FastHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`FastHashMap`].
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(k, v) = slot {
                self.remaining -= 1;
                return Some((k, v));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Iterator over the keys of a [`FastHashMap`].
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over the values of a [`FastHashMap`].
#[derive(Debug)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
