//! Construction errors.
//!
//! Every cache in this crate validates its configuration up front. Fallible
//! constructors (`try_init`, `try_new`) return [`ConfigError`]; the
//! convenience constructors (`new`) panic with the same message, so an
//! unusable layout is reported at construction time instead of degrading
//! later.
//!
//! Looking up or removing an absent key is never an error, and a full cache
//! evicts instead of rejecting writes, so there is no runtime error type.
//!
//! ```
//! use gencache::error::ConfigError;
//!
//! # #[cfg(feature = "concurrent")]
//! # {
//! use gencache::ConcurrentLruCache;
//!
//! let err = ConcurrentLruCache::<u32, u32>::try_new(9).unwrap_err();
//! assert_eq!(err, ConfigError::CapacityTooSmall { capacity: 9, minimum: 10 });
//! # }
//! ```

use core::fmt;

/// Error returned when cache configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The requested capacity cannot form a usable layout.
    CapacityTooSmall {
        /// Capacity that was requested.
        capacity: usize,
        /// Smallest capacity the cache accepts.
        minimum: usize,
    },
    /// Load factor outside the open interval `(0, 1)`.
    InvalidLoadFactor(f32),
    /// The slot table needed for the expected size exceeds `2^30` slots.
    TableTooLarge {
        /// Expected number of entries.
        expected: usize,
        /// Load factor the table was sized for.
        load_factor: f32,
    },
    /// Fewer than two generations leave nothing to evict into.
    InvalidGenerations(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CapacityTooSmall { capacity, minimum } => write!(
                f,
                "cache capacity {} too small, minimal cache size is {}",
                capacity, minimum
            ),
            ConfigError::InvalidLoadFactor(load_factor) => {
                write!(f, "load factor {} must be in (0, 1)", load_factor)
            }
            ConfigError::TableTooLarge {
                expected,
                load_factor,
            } => write!(
                f,
                "table too large ({} expected elements with load factor {})",
                expected, load_factor
            ),
            ConfigError::InvalidGenerations(generations) => write!(
                f,
                "generation count {} must be at least 2",
                generations
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_capacity_too_small() {
        let err = ConfigError::CapacityTooSmall {
            capacity: 9,
            minimum: 10,
        };
        assert_eq!(
            err.to_string(),
            "cache capacity 9 too small, minimal cache size is 10"
        );
    }

    #[test]
    fn test_display_load_factor() {
        let err = ConfigError::InvalidLoadFactor(1.5);
        assert!(err.to_string().contains("(0, 1)"));
    }

    #[test]
    fn test_display_generations() {
        let err = ConfigError::InvalidGenerations(1);
        assert_eq!(err.to_string(), "generation count 1 must be at least 2");
    }

    #[test]
    fn test_errors_compare() {
        assert_eq!(
            ConfigError::InvalidGenerations(0),
            ConfigError::InvalidGenerations(0)
        );
        assert_ne!(
            ConfigError::InvalidGenerations(0),
            ConfigError::InvalidGenerations(1)
        );
    }
}
