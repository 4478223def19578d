//! Configuration for [`ClockMap`](crate::ClockMap).
//!
//! The map keeps at most `max_size` entries in a slot table sized for a one
//! third load factor, so probe chains stay short even when the map is full.
//! `max_size` must be at least [`MIN_CLOCK_SIZE`](crate::clock::MIN_CLOCK_SIZE).

use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for a CLOCK (second chance) map.
#[derive(Clone, Copy)]
pub struct ClockMapConfig {
    /// Maximum number of entries kept.
    pub max_size: NonZeroUsize,
}

impl fmt::Debug for ClockMapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockMapConfig")
            .field("max_size", &self.max_size)
            .finish()
    }
}
