//! Builder for [`LfuCache`].
//!
//! Validates construction parameters up front so that a built cache never has
//! to re-check them on the hot path.
//!
//! ## Example
//!
//! ```rust
//! use lfucache::builder::LfuCacheBuilder;
//!
//! let mut cache = LfuCacheBuilder::new(100).build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! // Grow storage on demand instead of reserving it all up front.
//! let lazy = LfuCacheBuilder::new(1_000_000)
//!     .preallocate(false)
//!     .try_build::<u64, u64>()
//!     .unwrap();
//! assert_eq!(lazy.capacity(), 1_000_000);
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lfu::LfuCache;

/// Configures and creates an [`LfuCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LfuCacheBuilder {
    capacity: usize,
    preallocate: bool,
}

impl LfuCacheBuilder {
    /// Starts a builder for a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            preallocate: true,
        }
    }

    /// Reserve index and arena storage for `capacity` entries at build time
    /// (default `true`).
    ///
    /// With preallocation the cache never allocates after construction except
    /// when hash-table churn from eviction forces a rehash. Without it,
    /// storage grows as entries arrive.
    pub fn preallocate(mut self, preallocate: bool) -> Self {
        self.preallocate = preallocate;
        self
    }

    /// Builds the cache.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `capacity` is zero.
    pub fn try_build<K, V>(self) -> Result<LfuCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        if self.capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(LfuCache::with_settings(self.capacity, self.preallocate))
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn build<K, V>(self) -> LfuCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(err) => panic!("invalid LFU cache configuration: {err}"),
        }
    }
}
