//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and lazy
//! TTL expiration. Not synchronized; see [`MemoryCache`](super::MemoryCache)
//! for the shared, locked handle.

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, CacheValue, LruTracker};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Capacity-bounded storage with LRU eviction and lazy TTL expiration.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker, holds exactly the keys of `entries`
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `capacity` entries.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Put ==
    /// Stores a value under `key` with an optional TTL in seconds.
    ///
    /// An absent value is ignored and leaves any existing entry untouched.
    /// If the key already exists the entry is replaced and its TTL reset.
    /// If the cache is at capacity and the key is new, the least recently
    /// used entry is evicted first.
    ///
    /// Returns the key evicted to make room, if any.
    pub fn put(
        &mut self,
        key: &str,
        value: Option<CacheValue>,
        ttl_seconds: Option<i64>,
    ) -> Option<String> {
        let value = value?;
        let mut evicted = None;

        let overwritten_expired = self.entries.get(key).map(CacheEntry::is_expired);

        match overwritten_expired {
            Some(true) => self.stats.record_expirations(1),
            Some(false) => {}
            None if self.entries.len() >= self.capacity => {
                if let Some(oldest) = self.lru.evict_oldest() {
                    self.entries.remove(&oldest);
                    self.stats.record_eviction();
                    debug!(key = %oldest, "Evicted least recently used entry");
                    evicted = Some(oldest);
                }
            }
            None => {}
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, ttl_seconds));
        self.lru.touch(key);
        self.stats.set_total_entries(self.entries.len());

        evicted
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// A hit marks the key most recently used. An expired entry is removed
    /// and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<CacheValue> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(Instant::now()),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "Dropped expired entry on access");
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    // == Peek ==
    /// Returns the entry under `key` without touching recency or expiring it.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Remove ==
    /// Removes an entry and returns its value.
    ///
    /// The value is returned even if the entry had already expired but was
    /// not yet observed as such.
    pub fn remove(&mut self, key: &str) -> Option<CacheValue> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
        Some(entry.into_value())
    }

    // == Clear ==
    /// Removes every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(expired_keys.len());
        self.stats.set_total_entries(self.entries.len());
        expired_keys.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the current number of entries, including expired ones not yet observed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
