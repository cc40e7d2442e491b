//! Fuzzy search result cache
//!
//! Results are keyed by normalized query string. Each entry carries the store
//! generation it was computed from, and a lookup only returns an entry from
//! the generation it asks for. When a newer generation is first seen every
//! entry is dropped; inserts tagged with an older generation are ignored.
//!
//! Eviction is moka's bounded cache with the LRU policy: a new query is
//! always admitted and the least recently used entry makes room for it.

use crate::record::Record;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Default number of cached queries
pub const DEFAULT_CACHE_CAPACITY: u64 = 100;

#[derive(Clone)]
struct Entry {
    generation: u64,
    results: Arc<[Record]>,
}

/// Bounded query → results cache
pub struct SearchCache {
    entries: Cache<String, Entry>,
    generation: AtomicU64,
}

impl SearchCache {
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .eviction_policy(EvictionPolicy::lru())
                .build(),
            generation: AtomicU64::new(0),
        }
    }

    /// Cached results for `query`, if computed against `generation`
    #[must_use]
    pub fn get(&self, query: &str, generation: u64) -> Option<Arc<[Record]>> {
        self.observe(generation);
        self.entries
            .get(query)
            .filter(|entry| entry.generation == generation)
            .map(|entry| entry.results)
    }

    /// Store results computed against `generation`
    ///
    /// Results from a generation older than the newest one seen are dropped.
    pub fn insert(&self, query: String, generation: u64, results: Arc<[Record]>) {
        if !self.observe(generation) {
            debug!(%query, generation, "Discarding results from a replaced store");
            return;
        }
        self.entries.insert(query, Entry { generation, results });
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Number of live entries after pending maintenance has run
    #[must_use]
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Advance to `generation` if it is newer; false if it is stale
    fn observe(&self, generation: u64) -> bool {
        let previous = self.generation.fetch_max(generation, Ordering::SeqCst);
        if generation > previous {
            debug!(from = previous, to = generation, "Store reloaded, clearing search cache");
            self.entries.invalidate_all();
        }
        generation >= previous
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
