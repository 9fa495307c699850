//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration and LRU eviction.

mod entry;
mod instance;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, CacheValue, Expiry};
pub use instance::MemoryCache;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Capacity used when a cache is requested without one
pub const DEFAULT_CAPACITY: usize = 256;
