//! Named Cache Instance
//!
//! Thread-safe handle around a [`CacheStore`], as handed out by the
//! registry. Values of any `Send + Sync` type can be stored; typed reads
//! downcast at the call site and report a mismatch instead of guessing.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, CacheValue};
use crate::error::Result;

// == Memory Cache ==
/// A named, capacity-bounded cache safe for concurrent use.
///
/// Every operation, including `get` (which reorders recency and may drop an
/// expired entry), runs under one lock scoped to this instance. Different
/// instances never share a lock.
pub struct MemoryCache {
    name: String,
    capacity: usize,
    store: Mutex<CacheStore>,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates an instance named `name` holding at most `capacity` entries.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if `capacity` is zero.
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self> {
        let store = CacheStore::new(capacity)?;
        Ok(Self {
            name: name.into(),
            capacity,
            store: Mutex::new(store),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Put ==
    /// Stores `value` under `key` with no expiration.
    pub fn put<V: Any + Send + Sync>(&self, key: &str, value: V) {
        self.put_value(key, Some(CacheValue::new(value)), None);
    }

    /// Stores `value` under `key`, expiring `ttl_seconds` from now.
    ///
    /// A negative TTL means the entry never expires.
    pub fn put_with_ttl<V: Any + Send + Sync>(&self, key: &str, value: V, ttl_seconds: i64) {
        self.put_value(key, Some(CacheValue::new(value)), Some(ttl_seconds));
    }

    /// Stores an optional value. `None` is a no-op and does not disturb an
    /// existing entry under `key`.
    pub fn put_option<V: Any + Send + Sync>(
        &self,
        key: &str,
        value: Option<V>,
        ttl_seconds: Option<i64>,
    ) {
        self.put_value(key, value.map(CacheValue::new), ttl_seconds);
    }

    /// Stores an already type-erased value.
    ///
    /// Returns the key evicted to make room, if any.
    pub fn put_value(
        &self,
        key: &str,
        value: Option<CacheValue>,
        ttl_seconds: Option<i64>,
    ) -> Option<String> {
        self.store.lock().put(key, value, ttl_seconds)
    }

    // == Get ==
    /// Returns the type-erased value under `key`, if present and not expired.
    pub fn get_value(&self, key: &str) -> Option<CacheValue> {
        self.store.lock().get(key)
    }

    /// Returns the value under `key` as a `T`.
    ///
    /// # Errors
    /// `CacheError::TypeMismatch` if the key holds a value of another type.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Result<Option<Arc<T>>> {
        self.get_value(key)
            .map(|value| value.downcast::<T>(key))
            .transpose()
    }

    /// Returns a clone of the value under `key`, or `default` if it is absent
    /// or expired.
    ///
    /// # Errors
    /// `CacheError::TypeMismatch` if the key holds a value of another type.
    pub fn get_or<T: Any + Send + Sync + Clone>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.get::<T>(key)?.map_or(default, |value| T::clone(&value)))
    }

    /// Returns the remaining lifetime of the entry under `key` without
    /// touching its recency.
    ///
    /// The outer `None` means the key is absent; `Some(None)` means the entry
    /// never expires. An expired entry that was not accessed yet reports
    /// `Some(Some(Duration::ZERO))`.
    pub fn ttl_remaining(&self, key: &str) -> Option<Option<Duration>> {
        self.store.lock().peek(key).map(|entry| entry.ttl_remaining())
    }

    // == Remove ==
    /// Removes the entry under `key`, returning its value if there was one.
    pub fn remove(&self, key: &str) -> Option<CacheValue> {
        self.store.lock().remove(key)
    }

    /// Removes the entry under `key`, returning its value as a `T`.
    ///
    /// The entry is removed even when the type does not match.
    pub fn remove_as<T: Any + Send + Sync>(&self, key: &str) -> Result<Option<Arc<T>>> {
        self.remove(key)
            .map(|value| value.downcast::<T>(key))
            .transpose()
    }

    // == Size ==
    /// Returns the number of stored entries, counting expired entries that
    /// have not been accessed since they expired.
    pub fn size(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    // == Clear ==
    /// Removes every entry. The instance stays usable.
    pub fn clear(&self) {
        self.store.lock().clear();
    }

    /// Drops every expired entry now instead of waiting for it to be accessed.
    pub fn purge_expired(&self) -> usize {
        self.store.lock().purge_expired()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }
}

impl fmt::Display for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:x}", self.name, self as *const Self as usize)
    }
}

impl fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("size", &self.size())
            .finish()
    }
}
