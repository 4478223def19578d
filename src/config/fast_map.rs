//! Configuration for [`FastHashMap`](crate::FastHashMap).
//!
//! # Sizing Guidelines
//!
//! - **`initial_capacity`**: the number of entries the map is expected to hold.
//!   The slot table is sized to hold that many entries below the load factor,
//!   rounded up to a power of two, so a good estimate avoids rebuilding the
//!   table while it fills.
//! - **`load_factor`**: the fraction of slots that may be in use (live entries
//!   plus tombstones) before the table is rebuilt. Must be in `(0, 1)`. Lower
//!   values shorten probe chains at the cost of memory.
//!
//! ```text
//! slots = next_power_of_two(max(2, ceil(initial_capacity / load_factor)))
//! ```
//!
//! # Examples
//!
//! ```
//! use gencache::config::FastHashMapConfig;
//! use gencache::FastHashMap;
//! use core::num::NonZeroUsize;
//!
//! let config = FastHashMapConfig {
//!     initial_capacity: NonZeroUsize::new(100).unwrap(),
//!     load_factor: 0.5,
//! };
//! let map: FastHashMap<u64, u64> = FastHashMap::try_init(config, None).unwrap();
//! assert_eq!(map.slot_capacity(), 256);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an open-addressing [`FastHashMap`](crate::FastHashMap).
#[derive(Clone, Copy)]
pub struct FastHashMapConfig {
    /// Number of entries the table should hold without growing.
    pub initial_capacity: NonZeroUsize,
    /// Maximum fraction of used slots, in the open interval `(0, 1)`.
    pub load_factor: f32,
}

impl Default for FastHashMapConfig {
    fn default() -> Self {
        FastHashMapConfig {
            initial_capacity: NonZeroUsize::new(13).unwrap_or(NonZeroUsize::MIN),
            load_factor: 0.5,
        }
    }
}

impl fmt::Debug for FastHashMapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastHashMapConfig")
            .field("initial_capacity", &self.initial_capacity)
            .field("load_factor", &self.load_factor)
            .finish()
    }
}
