// ==============================================
// EXTERNAL LOCKING TESTS (integration)
// ==============================================
//
// LfuCache has no internal synchronization. These tests share it behind a
// parking_lot::Mutex and check that the usual wrapper pattern keeps every
// invariant intact under contention.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use lfucache::LfuCache;
use parking_lot::Mutex;

type SharedLfuCache<K, V> = Arc<Mutex<LfuCache<K, V>>>;

#[test]
fn test_mixed_operations_under_mutex() {
    let cache: SharedLfuCache<String, usize> = Arc::new(Mutex::new(LfuCache::new(64)));
    let num_threads = 8;
    let operations_per_thread = 500;
    let completed = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let cache = Arc::clone(&cache);
            let completed = Arc::clone(&completed);

            thread::spawn(move || {
                for i in 0..operations_per_thread {
                    let key = format!("key_{}", (thread_id * 7 + i) % 96);
                    match i % 5 {
                        0 | 1 => {
                            cache.lock().put(key, i);
                        },
                        2 | 3 => {
                            let _ = cache.lock().get(&key);
                        },
                        _ => {
                            let guard = cache.lock();
                            let _ = guard.key_frequency(&key);
                            let _ = guard.iter().take(4).count();
                        },
                    }
                    completed.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        completed.load(Ordering::Relaxed),
        num_threads * operations_per_thread
    );

    let guard = cache.lock();
    assert!(guard.len() <= guard.capacity());
    guard.check_invariants().unwrap();
}

#[test]
fn test_frequency_counts_every_locked_hit() {
    let cache: SharedLfuCache<u32, u32> = Arc::new(Mutex::new(LfuCache::new(4)));
    cache.lock().put(1, 1);

    let num_threads = 4;
    let hits_per_thread = 1_000;

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..hits_per_thread {
                    assert_eq!(cache.lock().get(&1), Some(&1));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let expected = 1 + (num_threads * hits_per_thread) as u64;
    assert_eq!(cache.lock().key_frequency(&1), Ok(expected));
}

#[test]
fn test_hot_key_survives_concurrent_scans() {
    let cache: SharedLfuCache<u64, u64> = Arc::new(Mutex::new(LfuCache::new(16)));
    {
        let mut guard = cache.lock();
        guard.put(0, 0);
        for _ in 0..10_000 {
            guard.get(&0);
        }
    }

    let handles: Vec<_> = (1..=4u64)
        .map(|thread_id| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..2_000u64 {
                    let key = thread_id * 100_000 + i;
                    cache.lock().put(key, key);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let guard = cache.lock();
    assert!(guard.contains(&0));
    assert_eq!(guard.iter().next(), Some((&0, &0)));
    assert_eq!(guard.len(), 16);
    guard.check_invariants().unwrap();
}
