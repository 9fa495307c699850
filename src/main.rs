//! Memcache Registry - load driver
//!
//! Hammers a named cache from several threads and reports its statistics.

use std::thread;
use std::time::Instant;

use anyhow::Context;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memcache_registry::{CacheRegistry, Config, MemoryCache};

/// Main entry point for the load driver.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Obtain the `load` cache from a registry with the configured default capacity
/// 4. Run the workers to completion
/// 5. Log final statistics
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memcache_registry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cache load driver");

    let config = Config::from_env();
    info!(
        "Configuration loaded: default_capacity={}, workers={}, ops_per_worker={}, key_space={}, ttl={}s",
        config.default_capacity,
        config.workers,
        config.ops_per_worker,
        config.key_space,
        config.ttl_seconds
    );

    let registry = CacheRegistry::new(config.default_capacity);
    let cache = registry
        .get_named("load")
        .context("failed to create the load cache")?;
    info!("Cache {} ready", cache);

    let started = Instant::now();
    thread::scope(|scope| {
        for worker in 0..config.workers {
            let cache = &cache;
            let config = &config;
            scope.spawn(move || run_worker(cache, config, worker));
        }
    });
    let elapsed = started.elapsed();

    let stats = cache.stats();
    info!(
        "Finished {} operations in {:?}: hits={}, misses={}, evictions={}, expirations={}, entries={}, hit_rate={:.3}",
        config.total_ops(),
        elapsed,
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.expirations,
        stats.total_entries,
        stats.hit_rate()
    );

    Ok(())
}

/// Read-through loop: look a key up, write it on a miss.
fn run_worker(cache: &MemoryCache, config: &Config, worker: usize) {
    let key_space = config.key_space.max(1) as u64;
    // xorshift64, seeded per worker so workers overlap without moving in lockstep
    let mut state = (worker as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);

    for op in 0..config.ops_per_worker {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;

        let key = format!("key:{}", state % key_space);
        match cache.get::<u64>(&key) {
            Ok(Some(_)) => {}
            Ok(None) => cache.put_with_ttl(&key, state, config.ttl_seconds),
            Err(err) => warn!(worker, "Unexpected value in load cache: {}", err),
        }

        if op > 0 && op % 1000 == 0 {
            debug!(worker, op, size = cache.size(), "Worker progress");
        }
    }
}
