// ==============================================
// HEAP ALLOCATION TESTS (integration)
// ==============================================
//
// dhat allows one profiler per process, so every scenario runs inside a
// single test function, each measured against its own baseline.

use lfucache::{LfuCache, LfuCacheBuilder};

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn blocks_during<F: FnOnce()>(body: F) -> u64 {
    let before = dhat::HeapStats::get();
    body();
    let after = dhat::HeapStats::get();
    after.total_blocks - before.total_blocks
}

fn bytes_during<F: FnOnce()>(body: F) -> u64 {
    let before = dhat::HeapStats::get();
    body();
    let after = dhat::HeapStats::get();
    after.total_bytes - before.total_bytes
}

#[test]
fn steady_state_operations_do_not_allocate() {
    let _profiler = dhat::Profiler::builder().testing().build();

    // Overwriting resident keys, including ones that share or leave a bucket.
    for _ in 0..20 {
        let mut cache: LfuCache<i32, i32> = LfuCache::new(100);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.get(&2);
        for _ in 0..10_000 {
            cache.put(27_000, 27_000);
        }
        for i in 3..=100 {
            cache.put(i, i);
        }

        let blocks = blocks_during(|| {
            for i in 3..=100 {
                cache.put(i, i);
            }
        });
        dhat::assert_eq!(blocks, 0);
    }

    // Hits and frequency queries.
    let mut cache: LfuCache<u64, u64> = LfuCache::new(1_000);
    for i in 0..1_000 {
        cache.put(i, i);
    }
    let blocks = blocks_during(|| {
        for round in 0..5_000u64 {
            let key = (round * 7) % 1_000;
            std::hint::black_box(cache.get(&key));
            std::hint::black_box(cache.key_frequency(&key).ok());
            std::hint::black_box(cache.get(&(key + 5_000)));
        }
    });
    dhat::assert_eq!(blocks, 0);

    // Iteration, full and abandoned after the first element.
    let mut wide: LfuCache<u32, u32> = LfuCache::new(10_000);
    for i in 1..=2_000u32 {
        for _ in 0..(i % 17) + 1 {
            wide.put(i, i);
        }
    }
    let bytes = bytes_during(|| {
        let sum: u64 = wide.iter().map(|(_, v)| u64::from(*v)).sum();
        std::hint::black_box(sum);
        std::hint::black_box(wide.iter().next());
        std::hint::black_box(wide.iter().rev().take(3).count());
    });
    dhat::assert_eq!(bytes, 0);

    // Eviction churn into a preallocated cache stays within the reserved
    // arenas; only the hash index may rehash.
    let mut churn: LfuCache<u64, u64> = LfuCacheBuilder::new(512).build();
    for i in 0..512 {
        churn.put(i, i);
    }
    let blocks = blocks_during(|| {
        for i in 512..4_096 {
            churn.put(i, i);
        }
    });
    dhat::assert!(blocks <= 8, "eviction churn allocated {} blocks", blocks);

    // Clearing keeps the reserved storage.
    let blocks = blocks_during(|| {
        churn.clear();
        for i in 0..512 {
            churn.put(i, i);
        }
    });
    dhat::assert_eq!(blocks, 0);
}
