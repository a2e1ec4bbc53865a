//! Optional operation counters for [`LfuCache`](crate::LfuCache).
//!
//! Compiled only with the `metrics` feature. Recording is split from reading:
//! the cache writes counters through the recorder traits in [`traits`], and
//! callers read a copyable [`LfuMetricsSnapshot`](snapshot::LfuMetricsSnapshot)
//! through [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).
//!
//! ```
//! # #[cfg(feature = "metrics")]
//! # {
//! use lfucache::LfuCache;
//! use lfucache::metrics::traits::MetricsSnapshotProvider;
//!
//! let mut cache = LfuCache::new(1);
//! cache.put("a", 1);
//! cache.get(&"a");
//! cache.get(&"missing");
//! cache.put("b", 2);
//!
//! let snap = cache.snapshot();
//! assert_eq!(snap.get_hits, 1);
//! assert_eq!(snap.get_misses, 1);
//! assert_eq!(snap.evicted_entries, 1);
//! # }
//! ```

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
