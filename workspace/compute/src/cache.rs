use cached::{Cached, UnboundCache};
use model::Country;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

use crate::error::Result;
use crate::loader::{LoadedTable, TableSource};

/// A caching wrapper for TableSource implementations.
///
/// Each country is loaded at most once; later requests return the same shared
/// table without touching the wrapped source until [`TableCache::clear_cache`]
/// is called. Failed loads are not cached.
pub struct TableCache<
    S: TableSource,
    C: Cached<Country, LoadedTable> = UnboundCache<Country, LoadedTable>,
> {
    /// The wrapped source
    inner: S,
    /// Loaded tables keyed by country
    tables: Arc<Mutex<C>>,
}

impl<S: TableSource, C: Cached<Country, LoadedTable>> TableCache<S, C> {
    /// Creates a cache wrapping the provided source with a custom cache store.
    pub fn new_with_store(inner: S, cache_store: C) -> Self {
        Self {
            inner,
            tables: Arc::new(Mutex::new(cache_store)),
        }
    }

    /// Removes all cached tables, forcing a reload on the next request.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.tables.lock() {
            debug!(entries = cache.cache_size(), "Clearing table cache");
            cache.cache_clear();
        }
    }

    /// Returns the number of cached countries.
    pub fn cache_size(&self) -> usize {
        if let Ok(cache) = self.tables.lock() {
            cache.cache_size()
        } else {
            0
        }
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: TableSource> TableCache<S, UnboundCache<Country, LoadedTable>> {
    /// Creates an unbounded cache; the key space is the six supported countries.
    pub fn new(inner: S) -> Self {
        Self::new_with_store(inner, UnboundCache::new())
    }
}

impl<S: TableSource, C: Cached<Country, LoadedTable> + Send> TableSource for TableCache<S, C> {
    fn load(&self, country: Country) -> Result<LoadedTable> {
        // Try to get from cache first
        if let Ok(mut cache) = self.tables.lock() {
            if let Some(cached) = cache.cache_get(&country) {
                trace!(country = %country, "Table cache hit");
                return Ok(cached.clone());
            }
        }

        // Not in cache, load through the wrapped source
        let loaded = self.inner.load(country)?;

        // Store in cache
        if let Ok(mut cache) = self.tables.lock() {
            cache.cache_set(country, loaded.clone());
        }

        Ok(loaded)
    }
}
