//! Component cache keyed by [`ModelAdapter::cache_key`](super::ModelAdapter::cache_key).

use std::sync::Arc;

use moka::sync::Cache;

use super::ModelAdapter;
use super::error::{AdapterError, AdapterResult};
use crate::constants::DEFAULT_CACHE_CAPACITY;

/// Builds an adapter on a cache miss.
pub type AdapterInit<'a> = Box<dyn FnOnce() -> AdapterResult<Arc<ModelAdapter>> + 'a>;

/// Cache of constructed adapters, injected by the host.
pub trait ComponentCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Arc<ModelAdapter>>;

    fn insert(&self, key: String, adapter: Arc<ModelAdapter>);

    /// Returns the entry for `key`, running `init` on a miss.
    ///
    /// Concurrent misses on the same key run `init` once; the others wait for
    /// its result. A failed `init` stores nothing.
    fn get_or_try_insert_with(
        &self,
        key: String,
        init: AdapterInit<'_>,
    ) -> AdapterResult<Arc<ModelAdapter>>;

    fn invalidate(&self, key: &str);
}

/// In-memory [`ComponentCache`] with LRU-style eviction.
pub struct MokaComponentCache {
    entries: Cache<String, Arc<ModelAdapter>>,
}

impl MokaComponentCache {
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` adapters.
    #[inline]
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Number of cached adapters (after pending evictions are applied).
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MokaComponentCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentCache for MokaComponentCache {
    #[inline]
    fn get(&self, key: &str) -> Option<Arc<ModelAdapter>> {
        self.entries.get(key)
    }

    #[inline]
    fn insert(&self, key: String, adapter: Arc<ModelAdapter>) {
        self.entries.insert(key, adapter);
    }

    fn get_or_try_insert_with(
        &self,
        key: String,
        init: AdapterInit<'_>,
    ) -> AdapterResult<Arc<ModelAdapter>> {
        self.entries
            .try_get_with(key, init)
            .map_err(|err| Arc::try_unwrap(err).unwrap_or_else(AdapterError::Shared))
    }

    #[inline]
    fn invalidate(&self, key: &str) {
        self.entries.invalidate(key);
    }
}
