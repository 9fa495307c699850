//! Cache Registry
//!
//! Lazily creates and hands out named [`MemoryCache`] instances, exactly one
//! per name for the lifetime of the registry.
//!
//! # Capacity is first-writer-wins
//! The capacity passed to [`CacheRegistry::get`] is only used when the
//! instance for that name is constructed. Later calls with another capacity
//! receive the original instance with its original capacity.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::info;

use crate::cache::{MemoryCache, DEFAULT_CAPACITY};
use crate::error::Result;

static GLOBAL_REGISTRY: Lazy<CacheRegistry> = Lazy::new(|| CacheRegistry::new(DEFAULT_CAPACITY));

// == Cache Registry ==
/// Map from cache name to its shared instance.
#[derive(Debug)]
pub struct CacheRegistry {
    /// Capacity used by the lookups that do not take one
    default_capacity: usize,
    instances: RwLock<HashMap<String, Arc<MemoryCache>>>,
}

impl CacheRegistry {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new(default_capacity: usize) -> Self {
        Self {
            default_capacity,
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the process-wide registry, created empty on first use.
    pub fn global() -> &'static CacheRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn default_capacity(&self) -> usize {
        self.default_capacity
    }

    // == Get ==
    /// Returns the instance named `name`, creating it with `capacity` if it
    /// does not exist yet.
    ///
    /// Concurrent first calls for the same name construct a single instance
    /// and all of them receive it. Lookups of existing names only take the
    /// shared lock.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` if the instance has to be created and
    /// `capacity` is zero. Nothing is registered in that case.
    pub fn get(&self, name: &str, capacity: usize) -> Result<Arc<MemoryCache>> {
        if let Some(cache) = self.instances.read().get(name) {
            return Ok(Arc::clone(cache));
        }

        let mut instances = self.instances.write();
        // Another caller may have won the race between the two locks
        if let Some(cache) = instances.get(name) {
            return Ok(Arc::clone(cache));
        }

        let cache = Arc::new(MemoryCache::new(name, capacity)?);
        instances.insert(name.to_string(), Arc::clone(&cache));
        info!(name, capacity, "Created cache instance");

        Ok(cache)
    }

    /// Returns the instance named `name`, created with the default capacity.
    pub fn get_named(&self, name: &str) -> Result<Arc<MemoryCache>> {
        self.get(name, self.default_capacity)
    }

    /// Returns the instance named after `capacity` itself.
    ///
    /// Two lookups with the same capacity share an instance; different
    /// capacities always get distinct ones.
    pub fn get_with_capacity(&self, capacity: usize) -> Result<Arc<MemoryCache>> {
        self.get(&capacity.to_string(), capacity)
    }

    /// Returns the unnamed instance with the default capacity.
    pub fn default_instance(&self) -> Result<Arc<MemoryCache>> {
        self.get_with_capacity(self.default_capacity)
    }

    // == Introspection ==
    pub fn contains(&self, name: &str) -> bool {
        self.instances.read().contains_key(name)
    }

    /// Returns the names of all instances created so far, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.instances.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
