//! Integration Tests for the Public Cache API
//!
//! Exercises the registry and named instances the way callers use them:
//! look an instance up by name, then put/get/remove/clear against it.

use std::sync::{Arc, Barrier};
use std::thread::{self, sleep};
use std::time::Duration;

use memcache_registry::{CacheError, CacheRegistry, MemoryCache};

// == Helper Functions ==

/// Names must be unique per test because the global registry is shared
fn global(name: &str, capacity: usize) -> Arc<MemoryCache> {
    CacheRegistry::global().get(name, capacity).unwrap()
}

// == Registry Tests ==

#[test]
fn test_registry_memoization_across_threads() {
    let registry = Arc::new(CacheRegistry::default());

    let lookup = |capacity: usize| {
        let registry = Arc::clone(&registry);
        thread::spawn(move || registry.get("x", capacity).unwrap())
    };

    // The second lookup starts only after the first has published its instance
    let first = lookup(10).join().unwrap();
    let second = lookup(999).join().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.capacity(), 10);
    assert_eq!(second.capacity(), 10);
}

#[test]
fn test_registry_concurrent_first_access() {
    const THREADS: usize = 8;
    let registry = Arc::new(CacheRegistry::default());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.get("contended", 10).unwrap()
            })
        })
        .collect();

    let caches: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(registry.len(), 1);
    assert!(caches.iter().all(|c| Arc::ptr_eq(c, &caches[0])));
}

#[test]
fn test_global_capacity_is_first_writer_wins() {
    let first = global("it-first-writer", 10);
    let second = global("it-first-writer", 999);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.capacity(), 10);
}

#[test]
fn test_global_unnamed_lookup_shares_by_capacity() {
    let registry = CacheRegistry::global();

    let a = registry.get_with_capacity(7919).unwrap();
    let b = registry.get_with_capacity(7919).unwrap();
    let c = registry.get_with_capacity(7907).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(a.name(), "7919");
    assert_eq!(c.capacity(), 7907);
}

#[test]
fn test_global_default_instance() {
    let cache = CacheRegistry::global().default_instance().unwrap();
    assert_eq!(cache.name(), "256");
    assert_eq!(cache.capacity(), 256);
}

#[test]
fn test_registry_rejects_zero_capacity() {
    let err = CacheRegistry::global().get("it-zero", 0).unwrap_err();
    assert_eq!(err, CacheError::InvalidCapacity(0));
    assert!(!CacheRegistry::global().contains("it-zero"));
}

// == Instance Tests ==

#[test]
fn test_lru_scenario() {
    let cache = global("it-lru", 2);

    cache.put("a", 1);
    cache.put("b", 2);
    assert_eq!(cache.get_or("a", 0).unwrap(), 1);
    cache.put("c", 3);

    assert_eq!(cache.get_or("a", 0).unwrap(), 1);
    assert_eq!(cache.get_or("c", 0).unwrap(), 3);
    assert_eq!(cache.get_or("b", -1).unwrap(), -1);
    assert_eq!(cache.size(), 2);
}

#[test]
fn test_ttl_scenario() {
    let cache = global("it-ttl", 8);

    cache.put_with_ttl("short", "v", 0);
    cache.put("forever", "v");
    cache.put_with_ttl("negative", "v", -1);

    sleep(Duration::from_millis(10));

    // Expired but not yet observed: still counted
    assert_eq!(cache.size(), 3);
    assert!(cache.get::<&str>("short").unwrap().is_none());
    assert_eq!(cache.size(), 2);
    assert_eq!(cache.get_or("forever", "gone").unwrap(), "v");
    assert_eq!(cache.get_or("negative", "gone").unwrap(), "v");
}

#[test]
fn test_null_value_is_noop() {
    let cache = global("it-null", 8);

    cache.put_option::<String>("k", None, None);

    assert_eq!(cache.size(), 0);
    assert_eq!(cache.get_or("k", String::from("default")).unwrap(), "default");
}

#[test]
fn test_clear_is_idempotent() {
    let cache = global("it-clear", 8);

    cache.clear();
    assert_eq!(cache.size(), 0);

    cache.put("a", 1u64);
    cache.put("b", 2u64);
    cache.clear();
    cache.clear();

    assert_eq!(cache.size(), 0);
    assert!(cache.get::<u64>("a").unwrap().is_none());
    assert!(cache.get::<u64>("b").unwrap().is_none());
}

#[test]
fn test_remove_returns_prior_value() {
    let cache = global("it-remove", 8);

    cache.put("k", "v");

    let removed = cache.remove("k").unwrap();
    assert_eq!(removed.downcast_ref::<&str>(), Some(&"v"));
    assert!(cache.remove("k").is_none());
}

#[test]
fn test_type_mismatch_surfaces_to_caller() {
    let cache = global("it-mismatch", 8);
    cache.put("k", 5u32);

    assert!(matches!(
        cache.get_or("k", String::new()),
        Err(CacheError::TypeMismatch { .. })
    ));
}

#[test]
fn test_instances_do_not_block_each_other() {
    let registry = Arc::new(CacheRegistry::default());
    let hot = registry.get("hot", 32).unwrap();
    let cold = registry.get("cold", 32).unwrap();

    let writers: Vec<_> = (0..4)
        .map(|worker| {
            let hot = Arc::clone(&hot);
            thread::spawn(move || {
                for i in 0..500 {
                    hot.put(&format!("{}-{}", worker, i % 50), i);
                }
            })
        })
        .collect();

    cold.put("k", "v");
    assert_eq!(cold.get_or("k", "").unwrap(), "v");

    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(cold.size(), 1);
    assert!(hot.size() <= 32);
    assert!(hot.stats().evictions > 0);
}
