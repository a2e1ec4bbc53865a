#![no_main]

use libfuzzer_sys::fuzz_target;
use lfucache::ds::{FrequencyLedger, SlotId};

// Fuzz arbitrary operation sequences on FrequencyLedger
//
// Tests random sequences of insert, touch, remove and pop_min, including
// operations on handles that have already been released.
fuzz_target!(|data: &[u8]| {
    let mut ledger: FrequencyLedger<u32, u8> = FrequencyLedger::new();
    let mut ids: Vec<SlotId> = Vec::new();
    let mut next_key = 0u32;

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 5;
        let pick = usize::from(chunk[1]);

        match op {
            0 => {
                let id = ledger.insert(next_key, chunk[1]);
                next_key += 1;
                assert_eq!(ledger.frequency(id), Some(1));
                ids.push(id);
            }
            1 | 2 => {
                if !ids.is_empty() {
                    let id = ids[pick % ids.len()];
                    let before = ledger.frequency(id);
                    let after = ledger.touch(id);
                    assert_eq!(after, before.map(|f| f.saturating_add(1)));
                }
            }
            3 => {
                if !ids.is_empty() {
                    let id = ids.swap_remove(pick % ids.len());
                    let removed = ledger.remove(id).is_some();
                    if removed {
                        assert_eq!(ledger.frequency(id), None);
                    }
                }
            }
            _ => {
                let min = ledger.min_freq();
                if let Some((_, _, freq)) = ledger.pop_min() {
                    assert_eq!(Some(freq), min);
                }
            }
        }

        assert_eq!(ledger.iter().count(), ledger.len());
        ledger.check_invariants().expect("invariants hold");
    }
});
