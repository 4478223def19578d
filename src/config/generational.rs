//! Configuration for the generational caches.
//!
//! Both [`LruFastHashMap`](crate::LruFastHashMap) and the thread-safe
//! `ConcurrentLruCache` split their capacity into a fixed number of equally
//! sized generations:
//!
//! ```text
//! generation_size = capacity / generations
//! ```
//!
//! When the newest generation is full and another entry must be written, the
//! oldest generation is dropped as a whole. A larger generation count makes
//! eviction finer grained (less of the cache disappears at once) but every miss
//! has to probe more tables.
//!
//! # Examples
//!
//! ```
//! use gencache::config::{GenerationalCacheConfig, DEFAULT_GENERATIONS};
//! use core::num::NonZeroUsize;
//!
//! let config = GenerationalCacheConfig::new(NonZeroUsize::new(12).unwrap());
//! assert_eq!(config.generations.get(), DEFAULT_GENERATIONS);
//! assert_eq!(config.generation_size(), 4);
//! ```

use crate::error::ConfigError;
use core::fmt;
use core::num::NonZeroUsize;

/// Number of generations used unless configured otherwise.
pub const DEFAULT_GENERATIONS: usize = 3;

/// Configuration for a generational approximate-LRU cache.
#[derive(Clone, Copy)]
pub struct GenerationalCacheConfig {
    /// Total number of entries the cache aims to hold.
    pub capacity: NonZeroUsize,
    /// Number of generations the capacity is split into.
    pub generations: NonZeroUsize,
}

impl GenerationalCacheConfig {
    /// Creates a configuration with [`DEFAULT_GENERATIONS`] generations.
    pub fn new(capacity: NonZeroUsize) -> Self {
        GenerationalCacheConfig {
            capacity,
            generations: NonZeroUsize::new(DEFAULT_GENERATIONS).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Entries each generation holds before the cache rotates.
    #[inline]
    pub fn generation_size(&self) -> usize {
        self.capacity.get() / self.generations.get()
    }

    /// Checks that the layout leaves room to evict into.
    ///
    /// At least two generations are needed, and every generation must hold at
    /// least one entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generations = self.generations.get();
        if generations < 2 {
            return Err(ConfigError::InvalidGenerations(generations));
        }
        if self.capacity.get() < generations {
            return Err(ConfigError::CapacityTooSmall {
                capacity: self.capacity.get(),
                minimum: generations,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for GenerationalCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationalCacheConfig")
            .field("capacity", &self.capacity)
            .field("generations", &self.generations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generational_config_defaults() {
        let config = GenerationalCacheConfig::new(NonZeroUsize::new(100).unwrap());
        assert_eq!(config.capacity.get(), 100);
        assert_eq!(config.generations.get(), 3);
        assert_eq!(config.generation_size(), 33);
    }

    #[test]
    fn test_generational_config_custom_generations() {
        let config = GenerationalCacheConfig {
            capacity: NonZeroUsize::new(100).unwrap(),
            generations: NonZeroUsize::new(4).unwrap(),
        };
        assert_eq!(config.generation_size(), 25);
    }

    #[test]
    fn test_generational_config_validate() {
        let config = GenerationalCacheConfig::new(NonZeroUsize::new(3).unwrap());
        assert_eq!(config.validate(), Ok(()));

        let config = GenerationalCacheConfig::new(NonZeroUsize::new(2).unwrap());
        assert_eq!(
            config.validate(),
            Err(ConfigError::CapacityTooSmall {
                capacity: 2,
                minimum: 3
            })
        );

        let config = GenerationalCacheConfig {
            capacity: NonZeroUsize::new(10).unwrap(),
            generations: NonZeroUsize::new(1).unwrap(),
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidGenerations(1)));
    }
}
