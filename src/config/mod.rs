//! Cache Configuration Module
//!
//! This module provides configuration structures for every cache in the crate.
//! Each cache type has its own dedicated configuration struct with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: Structural parameters are `NonZeroUsize`, so a zero size
//!   cannot be expressed at all
//! - **Validated once**: Everything a type cannot express (load factor range,
//!   minimum capacities) is checked by the cache's `try_init` constructor
//!
//! # Configs
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `FastHashMapConfig` | [`FastHashMap`](crate::FastHashMap) | Open-addressing hash table |
//! | `LruHashMapConfig` | [`LruHashMap`](crate::LruHashMap) | Size-capped ordered map |
//! | `GenerationalCacheConfig` | [`LruFastHashMap`](crate::LruFastHashMap), `ConcurrentLruCache` | Generational approximate LRU |
//! | `ClockMapConfig` | [`ClockMap`](crate::ClockMap) | CLOCK / second-chance map |
//!
//! # Examples
//!
//! ```
//! use gencache::config::GenerationalCacheConfig;
//! use gencache::LruFastHashMap;
//! use core::num::NonZeroUsize;
//!
//! let config = GenerationalCacheConfig {
//!     capacity: NonZeroUsize::new(3_000).unwrap(),
//!     generations: NonZeroUsize::new(3).unwrap(),
//! };
//!
//! let cache: LruFastHashMap<String, i32> = LruFastHashMap::init(config, None);
//! assert_eq!(cache.generation_size(), 1_000);
//! ```

pub mod clock;
pub mod fast_map;
pub mod generational;
pub mod lru_map;

pub use clock::ClockMapConfig;
pub use fast_map::FastHashMapConfig;
pub use generational::{GenerationalCacheConfig, DEFAULT_GENERATIONS};
pub use lru_map::{EvictionOrder, LruHashMapConfig};
