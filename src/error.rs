//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and its registry.
///
/// Absent keys and absent values are not errors; lookups report them as
/// `None` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A cache instance was requested with a capacity that cannot hold anything
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// A stored value was read back as a different type than it was written with
    #[error("Type mismatch for key '{key}': expected {expected}")]
    TypeMismatch {
        /// The key that was read
        key: String,
        /// Name of the type the caller asked for
        expected: &'static str,
    },
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
