pub use crate::builder::LfuCacheBuilder;
pub use crate::error::{ConfigError, InvariantError, KeyNotFound};
pub use crate::policy::lfu::LfuCache;

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
