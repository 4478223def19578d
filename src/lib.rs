#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Which Map Should I Use?
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                                                                             │
//! │  Do you need eviction at all?                                               │
//! │       │                                                                     │
//! │      No ──▶ FastHashMap (open addressing, grows on demand)                  │
//! │       │                                                                     │
//! │      Yes                                                                    │
//! │       ▼                                                                     │
//! │  Shared between threads? ──Yes──▶ ConcurrentLruCache                        │
//! │       │                                                                     │
//! │      No                                                                     │
//! │       ▼                                                                     │
//! │  Exact eviction order? ──Yes──▶ LruHashMap (keys) / LruList (values)        │
//! │       │                                                                     │
//! │      No                                                                     │
//! │       ▼                                                                     │
//! │  Bulk eviction is fine? ──Yes──▶ LruFastHashMap (generations)               │
//! │       │                                                                     │
//! │      No ──▶ ClockMap (second chance, one entry at a time)                   │
//! │                                                                             │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Type | Description | Eviction |
//! |------|-------------|----------|
//! | [`FastHashMap`] | Open-addressing hash map | none |
//! | [`LruList`] | Bounded list of values | oldest added |
//! | [`LruHashMap`] | Bounded ordered map | oldest inserted (or accessed) |
//! | [`LruFastHashMap`] | Generational approximate LRU | oldest generation, in bulk |
//! | [`ClockMap`] | CLOCK / second chance | first entry without a second chance |
//! | `ConcurrentLruCache` | Thread-safe generational LRU | oldest generation, in bulk |
//!
//! ## Performance Characteristics
//!
//! | Type | Get | Put | Remove | Bound |
//! |------|-----|-----|--------|-------|
//! | FastHashMap | O(1) | O(1) amortized | O(1) | none |
//! | LruList | O(n) by index | O(1) | O(n) by index | exact |
//! | LruHashMap | O(1) | O(1) | O(1) | exact |
//! | LruFastHashMap | O(generations) | O(1) amortized | O(generations) | approximate |
//! | ClockMap | O(1) | O(1) amortized | O(1) | exact |
//! | ConcurrentLruCache | O(generations) | O(1) amortized | O(generations) | approximate |
//!
//! ## Code Examples
//!
//! ### Generational cache
//!
//! Reads of older entries copy them into the newest generation; when the
//! newest generation is full, the oldest one is dropped as a whole.
//!
//! ```rust
//! use gencache::LruFastHashMap;
//! use core::num::NonZeroUsize;
//!
//! let mut cache = LruFastHashMap::new(NonZeroUsize::new(12).unwrap());
//! for i in 1..=12 {
//!     cache.put(i, i * 10);
//! }
//!
//! // 1 lives in the oldest generation: reading it rescues it and drops 2 to 4
//! assert_eq!(cache.get(&1), Some(&10));
//! assert!(cache.contains_key(&1));
//! assert!(!cache.contains_key(&2));
//! ```
//!
//! ### Size-capped map
//!
//! ```rust
//! use gencache::LruHashMap;
//! use core::num::NonZeroUsize;
//!
//! let mut map = LruHashMap::new(NonZeroUsize::new(2).unwrap());
//! map.put("a", 1);
//! map.put("b", 2);
//! map.put("c", 3);
//! assert!(!map.contains_key(&"a"));
//! assert_eq!(map.len(), 2);
//! ```
//!
//! ### Metrics
//!
//! Every evicting cache implements [`metrics::CacheMetrics`]:
//!
//! ```rust
//! use gencache::ClockMap;
//! use gencache::metrics::CacheMetrics;
//! use core::num::NonZeroUsize;
//!
//! let mut map = ClockMap::new(NonZeroUsize::new(4).unwrap());
//! map.put(1, "one");
//! map.get(&1);
//! map.get(&2);
//!
//! let metrics = map.metrics();
//! assert_eq!(metrics.get("cache_hits"), Some(&1.0));
//! assert_eq!(metrics.get("requests"), Some(&2.0));
//! assert_eq!(map.algorithm_name(), "CLOCK");
//! ```
//!
//! ## Modules
//!
//! - [`fast_map`]: Open-addressing hash map
//! - [`lru_list`]: Size-capped list of values
//! - [`lru_map`]: Size-capped ordered map
//! - [`generational`]: Generational approximate-LRU cache
//! - [`clock`]: CLOCK (second chance) map
//! - [`config`]: Configuration structures for all caches
//! - [`error`]: Construction errors
//! - [`metrics`]: Metrics collection for cache performance monitoring
//! - `concurrent`: Thread-safe generational cache (requires `concurrent` feature)

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Slab-backed doubly linked list.
///
/// Internal ordering structure of [`LruList`] and [`LruHashMap`]. Nodes live
/// in a vector and link to each other by index.
pub(crate) mod list;

/// Construction errors shared by all caches.
pub mod error;

/// Cache configuration structures.
///
/// Provides configuration structures for all cache implementations.
pub mod config;

/// Cache metrics system.
///
/// Provides a flexible metrics collection and reporting system for all caches.
/// Each cache tracks its own extra counters while implementing a common interface.
pub mod metrics;

/// Open-addressing hash map with linear probing.
///
/// The storage of every generation in [`LruFastHashMap`].
pub mod fast_map;

/// Size-capped list that evicts its oldest value.
pub mod lru_list;

/// Size-capped map that evicts its oldest key.
///
/// Evicts in insertion order by default, or in access order when configured
/// with [`config::EvictionOrder::Access`].
pub mod lru_map;

/// Generational approximate-LRU cache.
///
/// Splits the capacity into a ring of generations and evicts the oldest
/// generation as a whole.
pub mod generational;

/// CLOCK (second chance) map.
pub mod clock;

/// Concurrent cache implementations.
///
/// Provides a thread-safe generational cache built on `parking_lot` locks.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use clock::ClockMap;
pub use error::ConfigError;
pub use fast_map::FastHashMap;
pub use generational::LruFastHashMap;
pub use lru_list::LruList;
pub use lru_map::LruHashMap;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;
