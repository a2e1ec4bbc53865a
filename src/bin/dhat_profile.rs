//! DHAT heap profiler for lfucache.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use lfucache::LfuCache;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

const CAPACITY: usize = 4096;
const OPERATIONS: usize = 100_000;
const UNIVERSE: u64 = 16_384;

/// Prints the blocks and bytes allocated since `before`.
fn report(phase: &str, before: &dhat::HeapStats) {
    let now = dhat::HeapStats::get();
    println!(
        "  {phase:<12} blocks: {:>8}  bytes: {:>10}  live: {:>10}",
        now.total_blocks - before.total_blocks,
        now.total_bytes - before.total_bytes,
        now.curr_bytes,
    );
}

/// Hotset workload: 90% of accesses hit 10% of keys.
fn hotset_workload(cache: &mut LfuCache<u64, u64>, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = UNIVERSE / 10;

    for _ in 0..OPERATIONS {
        let key = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (UNIVERSE - hot_size))
        };

        if cache.get(&key).is_none() {
            cache.put(key, key);
        }
    }
}

/// Scan workload: sequential access over the whole universe.
fn scan_workload(cache: &mut LfuCache<u64, u64>) {
    for i in 0..OPERATIONS / 2 {
        let key = (i as u64) % UNIVERSE;
        if cache.get(&key).is_none() {
            cache.put(key, key);
        }
    }
}

/// Overwrite keys that are already cached.
fn update_workload(cache: &mut LfuCache<u64, u64>) {
    let resident: Vec<u64> = cache.iter().map(|(k, _)| *k).collect();
    let before = dhat::HeapStats::get();
    for round in 0..OPERATIONS / resident.len().max(1) {
        for &key in &resident {
            cache.put(key, round as u64);
        }
    }
    report("update", &before);
}

/// Every insert is a new key, so every insert evicts.
fn eviction_churn(cache: &mut LfuCache<u64, u64>) {
    for i in 0..OPERATIONS / 4 {
        let key = UNIVERSE + i as u64;
        cache.put(key, key);
    }
}

fn iterate(cache: &LfuCache<u64, u64>) -> u64 {
    let mut sum = 0u64;
    for _ in 0..100 {
        sum = cache.iter().fold(sum, |acc, (_, v)| acc.wrapping_add(*v));
    }
    sum
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("lfucache DHAT Heap Profiling");
    println!("============================\n");

    let before = dhat::HeapStats::get();
    let mut cache = LfuCache::new(CAPACITY);
    report("construct", &before);

    let before = dhat::HeapStats::get();
    for i in 0..CAPACITY as u64 {
        cache.put(i, i);
    }
    report("warmup", &before);

    let before = dhat::HeapStats::get();
    hotset_workload(&mut cache, 42);
    report("hotset", &before);

    let before = dhat::HeapStats::get();
    scan_workload(&mut cache);
    report("scan", &before);

    update_workload(&mut cache);

    let before = dhat::HeapStats::get();
    eviction_churn(&mut cache);
    report("churn", &before);

    let before = dhat::HeapStats::get();
    let checksum = iterate(&cache);
    report("iterate", &before);

    println!("\n  Final size: {} (checksum {checksum})", cache.len());
    println!("\n============================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
