//! Configuration for [`LruHashMap`](crate::LruHashMap).
//!
//! # Eviction order
//!
//! The map caps its size by dropping its oldest entry. What "oldest" means is
//! selected by [`EvictionOrder`]:
//!
//! - [`EvictionOrder::Insertion`] (default): age is the original insertion
//!   time. Overwriting or reading a key does not make it younger, so the map
//!   behaves as a FIFO with overwrite.
//! - [`EvictionOrder::Access`]: reads and overwrites move the key to the young
//!   end, giving exact least-recently-used eviction.
//!
//! # Examples
//!
//! ```
//! use gencache::config::{EvictionOrder, LruHashMapConfig};
//! use gencache::LruHashMap;
//! use core::num::NonZeroUsize;
//!
//! let config = LruHashMapConfig {
//!     max_size: NonZeroUsize::new(2).unwrap(),
//!     order: EvictionOrder::Access,
//! };
//! let mut map = LruHashMap::init(config, None);
//! map.put("a", 1);
//! map.put("b", 2);
//! map.get(&"a");
//! map.put("c", 3);
//! assert!(map.contains_key(&"a"));
//! assert!(!map.contains_key(&"b"));
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Which age an [`LruHashMap`](crate::LruHashMap) evicts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionOrder {
    /// Evict by original insertion order; reads and overwrites keep the age.
    #[default]
    Insertion,
    /// Evict by last access; reads and overwrites refresh the age.
    Access,
}

/// Configuration for a size-capped [`LruHashMap`](crate::LruHashMap).
#[derive(Clone, Copy)]
pub struct LruHashMapConfig {
    /// Maximum number of entries kept.
    pub max_size: NonZeroUsize,
    /// Age used to pick the entry to drop.
    pub order: EvictionOrder,
}

impl LruHashMapConfig {
    /// Creates an insertion-ordered configuration.
    pub fn new(max_size: NonZeroUsize) -> Self {
        LruHashMapConfig {
            max_size,
            order: EvictionOrder::Insertion,
        }
    }
}

impl fmt::Debug for LruHashMapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruHashMapConfig")
            .field("max_size", &self.max_size)
            .field("order", &self.order)
            .finish()
    }
}
