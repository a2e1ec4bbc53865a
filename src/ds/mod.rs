pub mod frequency_ledger;
pub mod slot_arena;

pub use frequency_ledger::{FrequencyLedger, Iter};
pub use slot_arena::{SlotArena, SlotId};
