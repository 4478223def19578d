//! Concurrent Cache Implementations
//!
//! This module provides [`ConcurrentLruCache`], the thread-safe counterpart of
//! [`LruFastHashMap`](crate::LruFastHashMap).
//!
//! # Architecture
//!
//! The cache keeps a ring of generations behind two levels of locks:
//!
//! - The generation list sits behind one `parking_lot::RwLock`. Lookups,
//!   promotions and ordinary inserts take it shared.
//! - Every generation is a `HashMap` behind its own `parking_lot::RwLock`, so
//!   readers of older generations never block each other and only writers to
//!   the current generation contend.
//! - Rotation (drop the oldest generation, make it the new current one) is the
//!   only operation that takes the list lock exclusively.
//!
//! ## Why RwLock Instead of Mutex?
//!
//! Unlike a list-based LRU, a generational cache does not touch shared state
//! on most reads: a hit in the current generation changes nothing, and a hit
//! in an older generation only writes to the current one. Most traffic is
//! therefore read-only and `RwLock` lets it proceed in parallel. Rotation is
//! rare (once per `generation_size` new keys) so the exclusive section stays
//! off the hot path.
//!
//! ## Never losing a hot key
//!
//! An insert always lands in the generation that is current while the shared
//! list lock is held. Since rotation needs the exclusive lock, a promotion can
//! never write into a generation that has already been dropped. A key that is
//! read at least once per generation turnover is therefore never evicted, no
//! matter how many unrelated keys other threads insert.
//!
//! # Example
//!
//! ```rust
//! use gencache::concurrent::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(ConcurrentLruCache::new(1000));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.put(key.clone(), i);
//!             let _ = cache.get(&key);
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert!(cache.len() >= 400);
//! ```
//!
//! # Thread Safety
//!
//! `ConcurrentLruCache` is `Send + Sync` whenever its keys, values and hasher
//! are, and can be shared through `Arc`.
//!
//! # Zero-Copy Access
//!
//! `get` returns a clone. Use `get_with()` to run a closure against the value
//! instead:
//!
//! ```rust,ignore
//! let len = cache.get_with(&key, |value| value.len());
//! ```

mod lru;

pub use self::lru::{ConcurrentLruCache, MIN_CAPACITY};
