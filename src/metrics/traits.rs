//! # Metrics Trait Hierarchy
//!
//! Recording, reading and snapshotting are separate traits so counter
//! bookkeeping never leaks into the eviction logic.
//!
//! ```text
//!             ┌─────────────────────────────┐
//!             │     CoreMetricsRecorder     │
//!             │  get_hit/get_miss/insert    │
//!             │  evict/clear                │
//!             └──────────────┬──────────────┘
//!                            │
//!                            ▼
//!             ┌─────────────────────────────┐      ┌─────────────────────────┐
//!             │     LfuMetricsRecorder      │      │ LfuMetricsReadRecorder  │
//!             │  pop_lfu/remove (&mut self) │      │ peek_lfu/frequency/iter │
//!             └─────────────────────────────┘      │ (&self, interior mut.)  │
//!                                                  └─────────────────────────┘
//!
//!   Consumption:  MetricsSnapshotProvider<S>  (tests, benches, dashboards)
//! ```

/// Common counters for any cache operation set.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// LFU-specific counters recorded from `&mut self` operations.
pub trait LfuMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lfu_call(&mut self);
    fn record_pop_lfu_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
}

/// Read-only LFU counters for `&self` methods (uses interior mutability).
///
/// `peek_lfu`, `key_frequency` and `iter` only borrow the cache, so their
/// counters live in [`MetricsCell`](super::cell::MetricsCell)s.
pub trait LfuMetricsReadRecorder {
    fn record_peek_lfu_call(&self);
    fn record_peek_lfu_found(&self);
    fn record_frequency_call(&self);
    fn record_frequency_found(&self);
    fn record_iter_call(&self);
}

/// Snapshot provider for tests, benches and monitoring glue.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
