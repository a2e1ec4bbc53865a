//! # LFU (Least Frequently Used) Cache
//!
//! A bounded key-value cache that evicts the entry with the lowest access
//! count, breaking ties by evicting the entry that has gone longest without a
//! touch. Lookup, insertion and eviction are O(1); iteration is lazy and
//! allocation-free.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                                  │
//!   │                                                                          │
//!   │   index: FxHashMap<K, SlotId>           ledger: FrequencyLedger<K, V>    │
//!   │   ┌─────────┬────────┐                  ┌───────────────────────────┐    │
//!   │   │ page_1  │ id_0   │ ───────────────► │ freq=1: [page_3, page_2]  │    │
//!   │   │ page_2  │ id_1   │                  │ freq=3: [page_4]          │    │
//!   │   │ page_3  │ id_2   │                  │ freq=9: [page_1]          │    │
//!   │   │ page_4  │ id_3   │                  └───────────────────────────┘    │
//!   │   └─────────┴────────┘                     ▲ min (eviction side)         │
//!   │                                                                          │
//!   │   capacity: usize  (fixed, > 0)                                          │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation Flow
//!
//! ```text
//!   put(key, value)
//!        │
//!        ▼
//!   key indexed? ── YES ──► replace value, touch (freq + 1), return old value
//!        │
//!        NO
//!        ▼
//!   len == capacity? ── YES ──► evict head of the min-frequency bucket
//!        │
//!        ▼
//!   append at the tail of the freq=1 bucket, index it
//!
//!   get(&key)      hit  → touch, return &value
//!                  miss → None, nothing changes
//! ```
//!
//! A `get` hit and an overwriting `put` are the same touch: both raise the
//! frequency by exactly one. [`key_frequency`](LfuCache::key_frequency),
//! [`peek`](LfuCache::peek), [`contains`](LfuCache::contains) and
//! [`iter`](LfuCache::iter) never touch.
//!
//! ## Iteration Order
//!
//! [`iter`](LfuCache::iter) yields the highest frequency first and, within a
//! frequency, the most recently touched first: exactly the reverse of the order
//! in which entries would be evicted. `iter().rev()` yields eviction order.
//!
//! ## Allocation
//!
//! The index and both arenas are reserved at `capacity` on construction (see
//! [`LfuCacheBuilder::preallocate`](crate::builder::LfuCacheBuilder::preallocate)).
//! Updating existing keys, `get`, `key_frequency` and iteration never touch the
//! heap.
//!
//! ## Thread Safety
//!
//! `LfuCache` is **not** internally synchronized. Wrap it in a mutex
//! (`parking_lot::Mutex<LfuCache<K, V>>`, `std::sync::Mutex`, ...) to share it.
//!
//! ## Example Usage
//!
//! ```
//! use lfucache::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&2);
//!
//! // 1 and 3 would tie at frequency 1; 1 has waited longer and is evicted.
//! cache.put(3, "three");
//!
//! assert!(cache.key_frequency(&1).is_err());
//! assert_eq!(cache.key_frequency(&2), Ok(2));
//! assert_eq!(cache.key_frequency(&3), Ok(1));
//!
//! let keys: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, vec![2, 3]);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builder::LfuCacheBuilder;
use crate::ds::frequency_ledger::{FrequencyLedger, Iter};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError, KeyNotFound};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LfuMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LfuMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsSnapshotProvider,
};

/// Bounded LFU cache.
///
/// See the [module documentation](self) for the eviction rules and
/// iteration order.
pub struct LfuCache<K, V> {
    index: FxHashMap<K, SlotId>,
    ledger: FrequencyLedger<K, V>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries, reserving all
    /// storage up front.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to
    /// handle that case without panicking.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("invalid LFU cache configuration: {err}"),
        }
    }

    /// Fallible form of [`new`](Self::new).
    ///
    /// ```
    /// use lfucache::LfuCache;
    ///
    /// assert!(LfuCache::<u32, u32>::try_new(8).is_ok());
    /// assert!(LfuCache::<u32, u32>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LfuCacheBuilder::new(capacity).try_build()
    }

    /// Builds a cache from already-validated settings.
    pub(crate) fn with_settings(capacity: usize, preallocate: bool) -> Self {
        let reserve = if preallocate { capacity } else { 0 };
        debug!(capacity, preallocate, "creating LFU cache");
        Self {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            ledger: FrequencyLedger::with_capacity(reserve),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        }
    }

    /// Associates `value` with `key` and returns the value it replaced.
    ///
    /// Overwriting an existing key counts as a use: its frequency rises by
    /// one. Inserting a new key into a full cache first evicts the oldest
    /// entry at the lowest frequency.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .ledger
                .value_mut(id)
                .map(|slot| std::mem::replace(slot, value));
            self.ledger.touch(id);
            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            if let Some((_key, _value)) = self.evict() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            }
        }

        let id = self.ledger.insert(key.clone(), value);
        self.index.insert(key, id);
        None
    }

    /// Returns the value for `key` and records a use.
    ///
    /// A miss returns `None` and changes nothing.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        self.ledger.touch(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.ledger.value(id)
    }

    /// Like [`get`](Self::get), but hands out a mutable reference.
    ///
    /// Counts as a use. Mutating the value does not count again.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        self.ledger.touch(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.ledger.value_mut(id)
    }

    /// Returns the value for `key` without recording a use.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.ledger.value(id)
    }

    /// Returns the current frequency of `key` without recording a use.
    ///
    /// A freshly inserted key reports `1`; every later `get` hit or
    /// overwriting `put` adds one.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`] if `key` is not cached (never inserted, evicted, or
    /// removed).
    pub fn key_frequency<Q>(&self, key: &Q) -> Result<u64, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_frequency_call();

        let freq = self
            .index
            .get(key)
            .and_then(|&id| self.ledger.frequency(id))
            .ok_or(KeyNotFound)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_frequency_found();

        Ok(freq)
    }

    /// Returns `true` if `key` is cached. Does not record a use.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Removes `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        let (_key, value) = self.ledger.remove(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(value)
    }

    /// Evicts and returns the entry `put` would evict next.
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lfu_call();

        let result = self.evict();

        #[cfg(feature = "metrics")]
        if result.is_some() {
            self.metrics.record_pop_lfu_found();
        }

        result
    }

    /// Returns the entry `put` would evict next, without removing it.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lfu_call();

        let (key, value, _freq) = self.ledger.peek_min()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lfu_found();

        Some((key, value))
    }

    /// Checks that the index and the frequency ledger describe the same
    /// entries and that every structural invariant holds. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.ledger.check_invariants()?;

        if self.index.len() != self.ledger.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but ledger holds {} entries",
                self.index.len(),
                self.ledger.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.ledger.get(id) {
                Some((stored, _)) if stored == key => {},
                _ => {
                    return Err(InvariantError::new(
                        "index entry points at a slot holding another key",
                    ));
                },
            }
        }
        Ok(())
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let (key, value, freq) = self.ledger.pop_min()?;
        self.index.remove(&key);
        trace!(
            frequency = freq,
            len = self.index.len(),
            "evicted least frequently used entry"
        );
        Some((key, value))
    }
}

impl<K, V> LfuCache<K, V> {
    /// Iterates over `(&key, &value)` pairs without recording any use.
    ///
    /// Highest frequency first; within a frequency, most recently touched
    /// first. Every call starts a fresh traversal, and the iterator holds
    /// only a shared borrow, so the cache cannot change underneath it and
    /// dropping it early leaves nothing behind.
    ///
    /// ```
    /// use lfucache::LfuCache;
    ///
    /// let mut cache = LfuCache::new(3);
    /// cache.put("a", 1);
    /// cache.put("b", 2);
    /// cache.put("c", 3);
    /// cache.get(&"a");
    ///
    /// let order: Vec<_> = cache.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(order, vec!["a", "c", "b"]);
    ///
    /// // Reversed: eviction order.
    /// let victims: Vec<_> = cache.iter().rev().map(|(k, _)| *k).collect();
    /// assert_eq!(victims, vec!["b", "c", "a"]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_iter_call();

        self.ledger.iter()
    }

    /// Number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Maximum number of entries, fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry. Reserved storage is kept, so refilling the cache
    /// does not allocate.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        debug!(dropped = self.ledger.len(), "clearing LFU cache");
        self.index.clear();
        self.ledger.clear();
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.ledger.len())
            .field("capacity", &self.capacity)
            .field("buckets", &self.ledger.bucket_count())
            .field("min_freq", &self.ledger.min_freq())
            .field("max_freq", &self.ledger.max_freq())
            .finish()
    }
}

impl<'a, K, V> IntoIterator for &'a LfuCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V> {
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lfu_calls: self.metrics.pop_lfu_calls,
            pop_lfu_found: self.metrics.pop_lfu_found,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            peek_lfu_calls: self.metrics.peek_lfu_calls.get(),
            peek_lfu_found: self.metrics.peek_lfu_found.get(),
            frequency_calls: self.metrics.frequency_calls.get(),
            frequency_found: self.metrics.frequency_found.get(),
            iter_calls: self.metrics.iter_calls.get(),
            clear_calls: self.metrics.clear_calls,
            cache_len: self.ledger.len(),
            bucket_count: self.ledger.bucket_count(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LfuMetricsSnapshot> for LfuCache<K, V> {
    fn snapshot(&self) -> LfuMetricsSnapshot {
        self.metrics_snapshot()
    }
}
