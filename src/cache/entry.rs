//! Cache Entry Module
//!
//! Defines the type-erased stored value and the immutable entry pairing it
//! with an absolute expiration instant.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{CacheError, Result};

// == Cache Value ==
/// A type-erased, cheaply clonable stored value.
///
/// The cache never inspects what it stores. Callers recover the concrete
/// type with [`CacheValue::downcast`], which fails rather than guessing when
/// the stored type differs.
#[derive(Clone)]
pub struct CacheValue(Arc<dyn Any + Send + Sync>);

impl CacheValue {
    /// Wraps a value for storage.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns true if the stored value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        (*self.0).is::<T>()
    }

    /// Borrows the stored value as a `T`, or `None` if it was stored as another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).downcast_ref::<T>()
    }

    /// Recovers a shared handle to the stored `T`.
    ///
    /// `key` is only used to describe the failure.
    pub fn downcast<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
        Arc::clone(&self.0)
            .downcast::<T>()
            .map_err(|_| CacheError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Returns true if both handles point at the same stored allocation.
    pub fn ptr_eq(&self, other: &CacheValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CacheValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CacheValue(..)")
    }
}

// == Expiry ==
/// Absolute expiration of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// The entry only leaves the cache through eviction, removal or clear
    Never,
    /// The entry is expired once the clock passes this instant
    At(Instant),
}

impl Expiry {
    /// Resolves an optional TTL in seconds against `now`.
    ///
    /// Absent or negative TTLs never expire. A TTL too large to represent is
    /// treated as never expiring as well.
    pub fn from_ttl_seconds(ttl_seconds: Option<i64>, now: Instant) -> Self {
        match ttl_seconds {
            Some(secs) if secs >= 0 => now
                .checked_add(Duration::from_secs(secs as u64))
                .map_or(Expiry::Never, Expiry::At),
            _ => Expiry::Never,
        }
    }

    /// Checks expiry against a given instant.
    ///
    /// Boundary condition: an entry is still live exactly at its deadline and
    /// expired strictly after it, so a zero TTL expires after any delay.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self {
            Expiry::Never => false,
            Expiry::At(deadline) => now > *deadline,
        }
    }
}

// == Cache Entry ==
/// A stored value together with its expiration.
///
/// Entries are never mutated after construction; an update replaces the
/// whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    value: CacheValue,
    expiry: Expiry,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry with an optional TTL in seconds.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_seconds` - TTL in seconds; `None` or negative means no expiration
    pub fn new(value: CacheValue, ttl_seconds: Option<i64>) -> Self {
        Self::with_expiry(value, Expiry::from_ttl_seconds(ttl_seconds, Instant::now()))
    }

    /// Creates an entry with an already resolved expiry.
    pub fn with_expiry(value: CacheValue, expiry: Expiry) -> Self {
        Self { value, expiry }
    }

    pub fn value(&self) -> &CacheValue {
        &self.value
    }

    pub fn expiry(&self) -> Expiry {
        self.expiry
    }

    /// Consumes the entry, returning its value.
    pub fn into_value(self) -> CacheValue {
        self.value
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expiry.is_expired_at(now)
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if the entry never expires.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the deadline has passed
    /// - `Some(remaining)` if the entry has a deadline in the future
    /// - `None` if the entry has no expiration
    pub fn ttl_remaining(&self) -> Option<Duration> {
        match self.expiry {
            Expiry::Never => None,
            Expiry::At(deadline) => Some(deadline.saturating_duration_since(Instant::now())),
        }
    }
}
