use lfucache::{KeyNotFound, LfuCache};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lfucache=trace")),
        )
        .init();

    let mut cache: LfuCache<&str, String> = LfuCache::new(2);

    cache.put("a", "alpha".to_string());
    cache.put("b", "beta".to_string());

    cache.get(&"a");
    cache.put("c", "gamma".to_string());

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));

    for (key, value) in &cache {
        let freq = cache.key_frequency(key).unwrap_or_default();
        println!("{key} => {value} (freq {freq})");
    }

    match cache.key_frequency(&"b") {
        Ok(freq) => println!("b still cached at {freq}"),
        Err(KeyNotFound) => println!("b: {}", KeyNotFound),
    }
}

// Expected output:
// contains a? true
// contains b? false
// a => alpha (freq 2)
// c => gamma (freq 1)
// b: key not found
//
// Explanation: capacity=2; "a" is accessed before inserting "c", so "b" is evicted.
// With RUST_LOG unset, the eviction is also logged at trace level.
