//! Name search over the record store
//!
//! Three kinds of lookup:
//! 1. **Prefix refilter**: the letter-by-letter narrowing used while typing.
//!    Only the letter group of the first typed character is scanned.
//! 2. **Fuzzy search**: substring either way or edit distance within a bound,
//!    with results cached per normalized query.
//! 3. **Closest match**: the single nearest name by edit distance, accepted
//!    only if it is within half the query length.
//!
//! None of these fail. An empty store or a query with no matches yields an
//! empty result.

pub mod cache;
pub mod distance;

pub use cache::{DEFAULT_CACHE_CAPACITY, SearchCache};
pub use distance::levenshtein;

use crate::record::{Record, format_commander_name, index_letter};
use crate::store::{IndexScope, RecordStore, Snapshot, compare_names};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Default edit distance accepted by fuzzy search
pub const DEFAULT_FUZZY_MAX_DISTANCE: usize = 2;

/// Tunables for a [`SearchEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Maximum number of cached fuzzy queries
    pub cache_capacity: u64,
    /// Largest edit distance fuzzy search still accepts
    pub fuzzy_max_distance: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            fuzzy_max_distance: DEFAULT_FUZZY_MAX_DISTANCE,
        }
    }
}

/// Records in `snapshot` whose name starts with `buffer`, ignoring case
///
/// Only the letter group for the uppercased first character of `buffer` is
/// consulted, and its sorted order is kept.
#[must_use]
pub fn refilter(buffer: &str, snapshot: &Snapshot, scope: IndexScope) -> Vec<Record> {
    let Some(letter) = index_letter(buffer) else {
        return Vec::new();
    };
    let prefix = buffer.to_lowercase();

    snapshot
        .letter_group(&letter, scope)
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&prefix))
        .filter_map(|name| snapshot.record_by_name(name).cloned())
        .collect()
}

/// Normalized form used for fuzzy keys: formatted, trimmed, lowercased
#[must_use]
pub fn normalize_query(query: &str) -> String {
    format_commander_name(query).to_lowercase()
}

/// Search engine bound to a record store
pub struct SearchEngine {
    store: Arc<RecordStore>,
    cache: SearchCache,
    settings: SearchSettings,
}

impl SearchEngine {
    /// Create an engine with default settings
    #[must_use]
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self::with_settings(store, SearchSettings::default())
    }

    #[must_use]
    pub fn with_settings(store: Arc<RecordStore>, settings: SearchSettings) -> Self {
        Self {
            store,
            cache: SearchCache::new(settings.cache_capacity),
            settings,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    #[must_use]
    pub const fn settings(&self) -> SearchSettings {
        self.settings
    }

    /// Current store snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.store.snapshot()
    }

    /// Replace the store contents and drop cached results
    pub fn load(&self, records: Vec<Record>) -> u64 {
        let generation = self.store.load(records);
        self.cache.clear();
        generation
    }

    /// Number of cached fuzzy queries
    #[must_use]
    pub fn cached_queries(&self) -> u64 {
        self.cache.len()
    }

    /// Prefix lookup against the current snapshot
    #[must_use]
    pub fn refilter(&self, buffer: &str, scope: IndexScope) -> Vec<Record> {
        refilter(buffer, &self.snapshot(), scope)
    }

    /// Fuzzy lookup, sorted case-insensitively by name
    ///
    /// A record matches when its lowercased name contains the normalized
    /// query, the query contains the name, or the two are within
    /// `fuzzy_max_distance` edits. A blank query matches nothing and is not
    /// cached.
    #[must_use]
    pub fn fuzzy_search(&self, query: &str) -> Arc<[Record]> {
        let query = normalize_query(query);
        if query.is_empty() {
            return Arc::from(Vec::new());
        }

        let snapshot = self.snapshot();
        if let Some(hit) = self.cache.get(&query, snapshot.ticket()) {
            debug!(%query, "Fuzzy search cache hit");
            return hit;
        }

        let max_distance = self.settings.fuzzy_max_distance;
        let mut results: Vec<Record> = snapshot
            .records()
            .par_iter()
            .filter(|r| {
                let name = r.name().to_lowercase();
                name.contains(&query)
                    || query.contains(&name)
                    || levenshtein(&name, &query) <= max_distance
            })
            .cloned()
            .collect();
        results.sort_by(|a, b| compare_names(a.name(), b.name()));

        debug!(%query, matches = results.len(), "Fuzzy search computed");
        let results: Arc<[Record]> = Arc::from(results);
        self.cache
            .insert(query, snapshot.ticket(), Arc::clone(&results));
        results
    }

    /// Nearest record by edit distance, if it is close enough
    ///
    /// The best distance must be at most half the normalized query's
    /// character count (rounded down). Ties go to the name that sorts first.
    #[must_use]
    pub fn closest_match(&self, query: &str) -> Option<Record> {
        let query = normalize_query(query);
        let snapshot = self.snapshot();

        let (distance, best) = snapshot
            .records()
            .par_iter()
            .map(|r| (levenshtein(&query, &r.name().to_lowercase()), r))
            .min_by(|(da, a), (db, b)| da.cmp(db).then_with(|| compare_names(a.name(), b.name())))?;

        let threshold = query.chars().count() / 2;
        if distance <= threshold {
            Some(best.clone())
        } else {
            debug!(%query, distance, threshold, "No close match");
            None
        }
    }

    /// Whether `value` mentions a known name or is mentioned by one
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.snapshot().contains(value)
    }
}
