//! lfucache: a bounded least-frequently-used cache.
//!
//! [`LfuCache`] keeps at most `capacity` entries. When a new key arrives at a
//! full cache, the entry with the fewest uses is evicted; among equally used
//! entries, the one untouched for longest goes first. `put`, `get` and
//! eviction are O(1), and [`LfuCache::iter`] walks the cache lazily without
//! allocating.
//!
//! ```
//! use lfucache::{KeyNotFound, LfuCache};
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3);
//!
//! assert_eq!(cache.key_frequency(&"a"), Ok(2));
//! assert_eq!(cache.key_frequency(&"b"), Err(KeyNotFound));
//! ```
//!
//! Internal layout is described in `DESIGN.md`.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use crate::builder::LfuCacheBuilder;
pub use crate::ds::frequency_ledger::Iter;
pub use crate::error::{ConfigError, InvariantError, KeyNotFound};
pub use crate::policy::lfu::LfuCache;
