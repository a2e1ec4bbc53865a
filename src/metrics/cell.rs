use std::cell::Cell;

/// A counter that can be bumped through `&self`.
///
/// `Cell` keeps the owning cache `!Sync`, which matches its contract: shared
/// access across threads goes through a caller-supplied lock.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get().wrapping_add(1));
    }
}
