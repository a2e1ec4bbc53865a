//! Frequency ledger: arena-backed frequency buckets with O(1) touch and evict.
//!
//! Every entry lives in exactly one bucket; every bucket holds the entries that
//! share one frequency, as an intrusive doubly-linked list ordered by touch
//! recency. Buckets are themselves linked into the ledger, sorted by ascending
//! frequency, so the head bucket always holds the global minimum.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                       FrequencyLedger<K, V>                              │
//! │                                                                          │
//! │   entries: SlotArena<Entry<K, V>>      buckets: SlotArena<Bucket>        │
//! │                                                                          │
//! │   min ──► ┌────────┐ ◄──► ┌────────┐ ◄──► ┌────────┐ ◄── max             │
//! │           │ freq=1 │      │ freq=2 │      │ freq=7 │                     │
//! │           └───┬────┘      └───┬────┘      └───┬────┘                     │
//! │               │               │               │                          │
//! │     head ──► [a] ◄──► [c] ◄── tail            ▼                          │
//! │              oldest   newest          head=tail ──► [b]                  │
//! │              (evict)                                                     │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Touch Flow
//!
//! ```text
//!   touch(c):                 freq=1 ──► freq=2
//!     1. unlink c from its bucket list
//!     2. target = next bucket if its freq == 2, else link a new freq=2
//!        bucket directly after the current one
//!     3. release the old bucket if it emptied (repairs min/max)
//!     4. push c at the tail of the target
//!
//!   Shortcut: when c is alone in its bucket and no freq+1 bucket exists,
//!   the bucket's frequency is bumped in place.
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time | Notes                                         |
//! |-------------|------|-----------------------------------------------|
//! | `insert`    | O(1) | Appends at the tail of the freq=1 bucket      |
//! | `touch`     | O(1) | Increment frequency, move to next bucket tail |
//! | `remove`    | O(1) | Unlink, release bucket if emptied             |
//! | `pop_min`   | O(1) | Head of the min bucket (oldest at min freq)   |
//! | `iter`      | O(n) | Lazy, no allocation                           |
//!
//! ## Allocation
//!
//! Live buckets never outnumber live entries: a new bucket is only linked when
//! the source bucket keeps at least one other entry. A ledger built with
//! [`FrequencyLedger::with_capacity`] therefore never reallocates while it
//! holds at most `capacity` entries.
//!
//! ## Thread Safety
//!
//! Not thread-safe. Callers provide their own locking.

use std::fmt;
use std::iter::FusedIterator;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Link fields first: they are read on every touch and evict.
#[derive(Debug)]
struct Entry<K, V> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    bucket: SlotId,
    freq: u64,
    key: K,
    value: V,
}

#[derive(Debug)]
struct Bucket {
    freq: u64,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

impl Bucket {
    fn new(freq: u64, prev: Option<SlotId>, next: Option<SlotId>) -> Self {
        Self {
            freq,
            head: None,
            tail: None,
            len: 0,
            prev,
            next,
        }
    }
}

/// Frequency-ordered bucket chain owning every cached entry.
///
/// Entries are addressed by the [`SlotId`] returned from
/// [`insert`](Self::insert). The ledger has no key index of its own; pair it
/// with a map from key to `SlotId` (as [`LfuCache`](crate::LfuCache) does).
///
/// # Example
///
/// ```
/// use lfucache::ds::FrequencyLedger;
///
/// let mut ledger = FrequencyLedger::new();
/// let a = ledger.insert("a", 1);
/// let _b = ledger.insert("b", 2);
///
/// assert_eq!(ledger.touch(a), Some(2));
/// assert_eq!(ledger.min_freq(), Some(1));
///
/// // "b" is alone at the minimum frequency.
/// assert_eq!(ledger.pop_min(), Some(("b", 2, 1)));
/// assert_eq!(ledger.min_freq(), Some(2));
/// ```
pub struct FrequencyLedger<K, V> {
    entries: SlotArena<Entry<K, V>>,
    buckets: SlotArena<Bucket>,
    min: Option<SlotId>,
    max: Option<SlotId>,
}

impl<K, V> FrequencyLedger<K, V> {
    /// Creates an empty ledger that grows on demand.
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            buckets: SlotArena::new(),
            min: None,
            max: None,
        }
    }

    /// Creates an empty ledger with room for `capacity` entries and the
    /// buckets they can occupy.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            buckets: SlotArena::with_capacity(capacity),
            min: None,
            max: None,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct frequencies currently held.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Lowest frequency in the ledger, or `None` when empty.
    pub fn min_freq(&self) -> Option<u64> {
        self.min
            .and_then(|id| self.buckets.get(id))
            .map(|bucket| bucket.freq)
    }

    /// Highest frequency in the ledger, or `None` when empty.
    pub fn max_freq(&self) -> Option<u64> {
        self.max
            .and_then(|id| self.buckets.get(id))
            .map(|bucket| bucket.freq)
    }

    #[inline]
    pub fn frequency(&self, id: SlotId) -> Option<u64> {
        self.entries.get(id).map(|entry| entry.freq)
    }

    #[inline]
    pub fn get(&self, id: SlotId) -> Option<(&K, &V)> {
        self.entries.get(id).map(|entry| (&entry.key, &entry.value))
    }

    #[inline]
    pub fn value(&self, id: SlotId) -> Option<&V> {
        self.entries.get(id).map(|entry| &entry.value)
    }

    #[inline]
    pub fn value_mut(&mut self, id: SlotId) -> Option<&mut V> {
        self.entries.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Adds a new entry with frequency 1 at the tail of the freq=1 bucket.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> SlotId {
        let bucket = match self.min {
            Some(min) if self.buckets.get(min).is_some_and(|b| b.freq == 1) => min,
            _ => self.link_bucket_front(1),
        };
        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            bucket,
            freq: 1,
            key,
            value,
        });
        self.push_back(bucket, id);
        id
    }

    /// Increments the frequency of `id` and moves it to the tail of the
    /// bucket for the new frequency. Returns the new frequency.
    ///
    /// At `u64::MAX` the frequency saturates; the entry is still moved to
    /// the tail of its bucket.
    #[inline]
    pub fn touch(&mut self, id: SlotId) -> Option<u64> {
        let (bucket_id, freq) = {
            let entry = self.entries.get(id)?;
            (entry.bucket, entry.freq)
        };
        let (sole, next) = {
            let bucket = self.buckets.get(bucket_id)?;
            (bucket.len == 1, bucket.next)
        };

        if freq == u64::MAX {
            if !sole {
                self.unlink(id)?;
                self.push_back(bucket_id, id)?;
            }
            return Some(freq);
        }

        let new_freq = freq + 1;
        let next_matches = match next {
            Some(next) => self.buckets.get(next)?.freq == new_freq,
            None => false,
        };

        if sole && !next_matches {
            self.buckets.get_mut(bucket_id)?.freq = new_freq;
            self.entries.get_mut(id)?.freq = new_freq;
            return Some(new_freq);
        }

        let target = match next {
            Some(next) if next_matches => next,
            _ => self.link_bucket_after(bucket_id, new_freq)?,
        };
        let (_, emptied) = self.unlink(id)?;
        if emptied {
            self.release_bucket(bucket_id);
        }
        self.entries.get_mut(id)?.freq = new_freq;
        self.push_back(target, id)?;
        Some(new_freq)
    }

    /// Removes `id` from the ledger, returning its key and value.
    pub fn remove(&mut self, id: SlotId) -> Option<(K, V)> {
        self.detach(id).map(|entry| (entry.key, entry.value))
    }

    /// Handle of the next eviction victim: the oldest entry at the minimum
    /// frequency.
    #[inline]
    pub fn peek_min_id(&self) -> Option<SlotId> {
        self.buckets.get(self.min?)?.head
    }

    /// Key, value and frequency of the next eviction victim.
    pub fn peek_min(&self) -> Option<(&K, &V, u64)> {
        let entry = self.entries.get(self.peek_min_id()?)?;
        Some((&entry.key, &entry.value, entry.freq))
    }

    /// Removes and returns the oldest entry at the minimum frequency.
    #[inline]
    pub fn pop_min(&mut self) -> Option<(K, V, u64)> {
        let id = self.peek_min_id()?;
        self.detach(id)
            .map(|entry| (entry.key, entry.value, entry.freq))
    }

    /// Drops every entry and bucket. Reserved storage is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.clear();
        self.min = None;
        self.max = None;
    }

    /// Iterates entries from the highest frequency down; within a frequency,
    /// most recently touched first. This is the reverse of eviction order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            ledger: self,
            front_bucket: self.max,
            front_entry: None,
            back_bucket: self.min,
            back_entry: None,
            remaining: self.entries.len(),
        }
    }

    /// Walks the whole structure and reports the first broken invariant.
    ///
    /// Checks that buckets are non-empty and strictly increasing, that every
    /// bucket's links and length agree with its entry list, that each entry's
    /// frequency matches its bucket, and that every arena slot is reachable.
    /// O(n); intended for tests, fuzzing and debug assertions.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entries.is_empty() {
            if !self.buckets.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty ledger still holds {} bucket(s)",
                    self.buckets.len()
                )));
            }
            if self.min.is_some() || self.max.is_some() {
                return Err(InvariantError::new("empty ledger has min/max bucket"));
            }
            return Ok(());
        }

        let mut bucket_prev: Option<SlotId> = None;
        let mut bucket_cursor = self.min;
        let mut last_freq = 0u64;
        let mut buckets_seen = 0usize;
        let mut entries_seen = 0usize;

        while let Some(bucket_id) = bucket_cursor {
            buckets_seen += 1;
            if buckets_seen > self.buckets.len() {
                return Err(InvariantError::new("bucket chain is cyclic"));
            }
            let bucket = self
                .buckets
                .get(bucket_id)
                .ok_or_else(|| InvariantError::new("bucket chain points at a free slot"))?;
            if bucket.prev != bucket_prev {
                return Err(InvariantError::new(format!(
                    "bucket freq={} has a stale prev link",
                    bucket.freq
                )));
            }
            if bucket.freq <= last_freq {
                return Err(InvariantError::new(format!(
                    "bucket freq={} follows freq={}",
                    bucket.freq, last_freq
                )));
            }
            if bucket.len == 0 {
                return Err(InvariantError::new(format!(
                    "bucket freq={} is empty",
                    bucket.freq
                )));
            }

            let mut entry_prev: Option<SlotId> = None;
            let mut entry_cursor = bucket.head;
            let mut count = 0usize;
            while let Some(id) = entry_cursor {
                count += 1;
                if count > bucket.len {
                    return Err(InvariantError::new(format!(
                        "bucket freq={} holds more entries than its len {}",
                        bucket.freq, bucket.len
                    )));
                }
                let entry = self
                    .entries
                    .get(id)
                    .ok_or_else(|| InvariantError::new("entry list points at a free slot"))?;
                if entry.bucket != bucket_id || entry.freq != bucket.freq {
                    return Err(InvariantError::new(format!(
                        "entry with freq={} sits in bucket freq={}",
                        entry.freq, bucket.freq
                    )));
                }
                if entry.prev != entry_prev {
                    return Err(InvariantError::new(format!(
                        "entry in bucket freq={} has a stale prev link",
                        bucket.freq
                    )));
                }
                entry_prev = Some(id);
                entry_cursor = entry.next;
            }
            if count != bucket.len || bucket.tail != entry_prev {
                return Err(InvariantError::new(format!(
                    "bucket freq={} len/tail disagree with its list",
                    bucket.freq
                )));
            }

            entries_seen += count;
            last_freq = bucket.freq;
            bucket_prev = Some(bucket_id);
            bucket_cursor = bucket.next;
        }

        if self.max != bucket_prev {
            return Err(InvariantError::new("max does not point at the last bucket"));
        }
        if buckets_seen != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "{} bucket(s) allocated but {} linked",
                self.buckets.len(),
                buckets_seen
            )));
        }
        if entries_seen != self.entries.len() {
            return Err(InvariantError::new(format!(
                "{} entries allocated but {} linked",
                self.entries.len(),
                entries_seen
            )));
        }
        Ok(())
    }

    fn detach(&mut self, id: SlotId) -> Option<Entry<K, V>> {
        let (bucket_id, emptied) = self.unlink(id)?;
        if emptied {
            self.release_bucket(bucket_id);
        }
        self.entries.remove(id)
    }

    fn link_bucket_front(&mut self, freq: u64) -> SlotId {
        let old_min = self.min;
        let id = self.buckets.insert(Bucket::new(freq, None, old_min));
        match old_min.and_then(|min| self.buckets.get_mut(min)) {
            Some(old) => old.prev = Some(id),
            None => self.max = Some(id),
        }
        self.min = Some(id);
        id
    }

    fn link_bucket_after(&mut self, anchor: SlotId, freq: u64) -> Option<SlotId> {
        let next = self.buckets.get(anchor)?.next;
        let id = self.buckets.insert(Bucket::new(freq, Some(anchor), next));
        self.buckets.get_mut(anchor)?.next = Some(id);
        match next {
            Some(next) => self.buckets.get_mut(next)?.prev = Some(id),
            None => self.max = Some(id),
        }
        Some(id)
    }

    /// Unlinks an emptied bucket from the ledger. This is the only place a
    /// bucket is freed, and the only place `min`/`max` move off a bucket.
    fn release_bucket(&mut self, id: SlotId) {
        let Some(bucket) = self.buckets.remove(id) else {
            return;
        };
        debug_assert_eq!(bucket.len, 0, "released bucket freq={} not empty", bucket.freq);

        match bucket.prev {
            Some(prev) => {
                if let Some(prev) = self.buckets.get_mut(prev) {
                    prev.next = bucket.next;
                }
            },
            None => self.min = bucket.next,
        }
        match bucket.next {
            Some(next) => {
                if let Some(next) = self.buckets.get_mut(next) {
                    next.prev = bucket.prev;
                }
            },
            None => self.max = bucket.prev,
        }
    }

    fn push_back(&mut self, bucket_id: SlotId, id: SlotId) -> Option<()> {
        let bucket = self.buckets.get_mut(bucket_id)?;
        let old_tail = bucket.tail;
        bucket.tail = Some(id);
        if old_tail.is_none() {
            bucket.head = Some(id);
        }
        bucket.len += 1;

        if let Some(old_tail) = old_tail {
            self.entries.get_mut(old_tail)?.next = Some(id);
        }
        let entry = self.entries.get_mut(id)?;
        entry.prev = old_tail;
        entry.next = None;
        entry.bucket = bucket_id;
        Some(())
    }

    /// Unlinks `id` from its bucket list. Returns the bucket and whether it
    /// is now empty; the caller decides whether to release it.
    fn unlink(&mut self, id: SlotId) -> Option<(SlotId, bool)> {
        let (bucket_id, prev, next) = {
            let entry = self.entries.get(id)?;
            (entry.bucket, entry.prev, entry.next)
        };

        match prev {
            Some(prev) => self.entries.get_mut(prev)?.next = next,
            None => self.buckets.get_mut(bucket_id)?.head = next,
        }
        match next {
            Some(next) => self.entries.get_mut(next)?.prev = prev,
            None => self.buckets.get_mut(bucket_id)?.tail = prev,
        }

        let bucket = self.buckets.get_mut(bucket_id)?;
        bucket.len -= 1;
        let emptied = bucket.len == 0;

        let entry = self.entries.get_mut(id)?;
        entry.prev = None;
        entry.next = None;
        Some((bucket_id, emptied))
    }
}

impl<K, V> Default for FrequencyLedger<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for FrequencyLedger<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyLedger")
            .field("len", &self.len())
            .field("buckets", &self.bucket_count())
            .field("min_freq", &self.min_freq())
            .field("max_freq", &self.max_freq())
            .finish()
    }
}

/// Borrowing iterator over a [`FrequencyLedger`].
///
/// Yields `(&K, &V)` from the highest frequency bucket to the lowest, and
/// within a bucket from most to least recently touched. `rev()` yields
/// eviction order. Holds no state beyond two cursors, so dropping it early
/// leaves nothing behind.
pub struct Iter<'a, K, V> {
    ledger: &'a FrequencyLedger<K, V>,
    front_bucket: Option<SlotId>,
    front_entry: Option<SlotId>,
    back_bucket: Option<SlotId>,
    back_entry: Option<SlotId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ledger = self.ledger;
        loop {
            if let Some(id) = self.front_entry {
                let entry = ledger.entries.get(id)?;
                self.front_entry = entry.prev;
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            let bucket = ledger.buckets.get(self.front_bucket?)?;
            self.front_entry = bucket.tail;
            self.front_bucket = bucket.prev;
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ledger = self.ledger;
        loop {
            if let Some(id) = self.back_entry {
                let entry = ledger.entries.get(id)?;
                self.back_entry = entry.next;
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            let bucket = ledger.buckets.get(self.back_bucket?)?;
            self.back_entry = bucket.head;
            self.back_bucket = bucket.next;
        }
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger,
            front_bucket: self.front_bucket,
            front_entry: self.front_entry,
            back_bucket: self.back_bucket,
            back_entry: self.back_entry,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> IntoIterator for &'a FrequencyLedger<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
