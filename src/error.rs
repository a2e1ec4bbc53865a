//! Error types for the lfucache library.
//!
//! ## Key Components
//!
//! - [`KeyNotFound`]: Returned by [`LfuCache::key_frequency`](crate::LfuCache::key_frequency)
//!   when the queried key is not cached. This is the only error a constructed
//!   cache ever reports; plain lookups signal misses with `Option`.
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (zero capacity).
//! - [`InvariantError`]: Returned by
//!   [`LfuCache::check_invariants`](crate::LfuCache::check_invariants) when the
//!   index, buckets and ledger disagree.
//!
//! ## Example Usage
//!
//! ```
//! use lfucache::error::{ConfigError, KeyNotFound};
//! use lfucache::LfuCache;
//!
//! let bad: Result<LfuCache<u64, u64>, ConfigError> = LfuCache::try_new(0);
//! assert!(bad.is_err());
//!
//! let mut cache = LfuCache::new(4);
//! cache.put("a", 1);
//! assert_eq!(cache.key_frequency(&"a"), Ok(1));
//! assert_eq!(cache.key_frequency(&"b"), Err(KeyNotFound));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// KeyNotFound
// ---------------------------------------------------------------------------

/// The queried key is not present in the cache.
///
/// Either it was never inserted, or it has since been evicted or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyNotFound;

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key not found")
    }
}

impl std::error::Error for KeyNotFound {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`LfuCache::check_invariants`](crate::LfuCache::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LfuCache::try_new`](crate::LfuCache::try_new) and
/// [`LfuCacheBuilder::try_build`](crate::builder::LfuCacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use lfucache::LfuCache;
///
/// let err = LfuCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}

    // -- KeyNotFound ------------------------------------------------------

    #[test]
    fn key_not_found_display() {
        assert_eq!(KeyNotFound.to_string(), "key not found");
    }

    #[test]
    fn key_not_found_is_boxable() {
        let boxed: Box<dyn std::error::Error> = Box::new(KeyNotFound);
        assert_eq!(boxed.to_string(), "key not found");
        assert_error::<KeyNotFound>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("bucket chain out of order");
        assert_eq!(err.to_string(), "bucket chain out of order");
        assert_eq!(err.message(), "bucket chain out of order");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be > 0");
        assert_eq!(err.to_string(), "capacity must be > 0");
        assert_eq!(err.message(), "capacity must be > 0");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad capacity");
        assert!(format!("{err:?}").contains("bad capacity"));
        assert_error::<ConfigError>();
    }
}
