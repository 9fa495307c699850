//! Configuration Module
//!
//! Loads load-driver and registry settings from environment variables.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::cache::DEFAULT_CAPACITY;

/// Driver configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Capacity of caches requested without one
    pub default_capacity: usize,
    /// Number of worker threads hitting the cache
    pub workers: usize,
    /// Operations performed by each worker
    pub ops_per_worker: usize,
    /// Number of distinct keys the workers touch
    pub key_space: usize,
    /// TTL in seconds for driver writes, negative for no expiration
    pub ttl_seconds: i64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_CAPACITY` - Default cache capacity (default: 256)
    /// - `CACHE_WORKERS` - Worker threads (default: 4)
    /// - `CACHE_OPS_PER_WORKER` - Operations per worker (default: 10000)
    /// - `CACHE_KEY_SPACE` - Distinct keys touched (default: 512)
    /// - `CACHE_TTL_SECONDS` - TTL for writes, negative = never (default: -1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_capacity: env_or("CACHE_DEFAULT_CAPACITY", defaults.default_capacity),
            workers: env_or("CACHE_WORKERS", defaults.workers),
            ops_per_worker: env_or("CACHE_OPS_PER_WORKER", defaults.ops_per_worker),
            key_space: env_or("CACHE_KEY_SPACE", defaults.key_space),
            ttl_seconds: env_or("CACHE_TTL_SECONDS", defaults.ttl_seconds),
        }
    }

    /// Total operations the driver performs across all workers.
    pub fn total_ops(&self) -> usize {
        self.workers.saturating_mul(self.ops_per_worker)
    }
}

/// Reads and parses `name`, falling back to `default` when unset or invalid.
fn env_or<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value '{}' for {}, using default {}", raw, name, default);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_CAPACITY,
            workers: 4,
            ops_per_worker: 10_000,
            key_space: 512,
            ttl_seconds: -1,
        }
    }
}
