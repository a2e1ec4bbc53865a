#![no_main]

use libfuzzer_sys::fuzz_target;
use lfucache::{KeyNotFound, LfuCache};

// Fuzz arbitrary operation sequences on LfuCache
//
// The first byte picks the capacity; every following pair of bytes is one
// operation. Invariants are checked after each step.
fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(first % 32) + 1;
    let mut cache: LfuCache<u8, u8> = LfuCache::new(capacity);

    for chunk in ops.chunks_exact(2) {
        let op = chunk[0] % 8;
        let key = chunk[1] % 64;

        match op {
            0 | 1 => {
                // put
                let before = cache.key_frequency(&key).ok();
                let old = cache.put(key, chunk[0]);
                assert_eq!(old.is_some(), before.is_some());
                let expected = before.map_or(1, |f| f.saturating_add(1));
                assert_eq!(cache.key_frequency(&key), Ok(expected));
            }
            2 | 3 => {
                // get
                let before = cache.key_frequency(&key).ok();
                let hit = cache.get(&key).is_some();
                assert_eq!(hit, before.is_some());
                if let Some(f) = before {
                    assert_eq!(cache.key_frequency(&key), Ok(f.saturating_add(1)));
                } else {
                    assert_eq!(cache.key_frequency(&key), Err(KeyNotFound));
                }
            }
            4 => {
                // remove
                let present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), present);
                assert!(!cache.contains(&key));
            }
            5 => {
                // pop_lfu agrees with peek_lfu
                let expected = cache.peek_lfu().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lfu(), expected);
            }
            6 => {
                // iteration: exact length, non-increasing frequency
                let mut last = u64::MAX;
                let mut count = 0;
                for (k, _) in cache.iter() {
                    let f = cache.key_frequency(k).expect("iterated key is cached");
                    assert!(f <= last);
                    last = f;
                    count += 1;
                }
                assert_eq!(count, cache.len());
            }
            _ => {
                if key == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().expect("invariants hold");
    }
});
