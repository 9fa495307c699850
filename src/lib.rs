//! Memcache Registry - in-process caches with LRU eviction and TTL expiration
//!
//! Named, capacity-bounded caches are created lazily through a
//! [`CacheRegistry`], exactly once per name, and shared between threads.
//!
//! ```
//! use memcache_registry::CacheRegistry;
//!
//! let cache = CacheRegistry::global().get("resolved-uris", 128).unwrap();
//! cache.put_with_ttl("home", String::from("app://home"), 60);
//!
//! let uri = cache.get_or("home", String::new()).unwrap();
//! assert_eq!(uri, "app://home");
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod registry;

pub use cache::{CacheStats, CacheValue, MemoryCache, DEFAULT_CAPACITY};
pub use config::Config;
pub use error::{CacheError, Result};
pub use registry::CacheRegistry;
