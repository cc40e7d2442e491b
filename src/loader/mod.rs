//! Dataset loaders
//!
//! Loaders are the only way records get into a [`RecordStore`]. Each one
//! does its own typed parsing and hands back a finite list of records; the
//! store never sees raw JSON.
//!
//! - [`JsonRecordLoader`]: the full record file
//! - [`NameListLoader`]: a plain list of names
//! - [`ScryfallClient`]: a live card search, page by page
//! - [`ScryfallPageLoader`]: saved card search pages
//! - [`BuiltinLoader`]: a small built-in set
//! - [`FallbackLoader`]: tries a chain of loaders in order
//!
//! [`spawn_load`] runs a loader on a background thread and publishes the
//! result through a load ticket, so a slow load that finishes after a newer
//! one is discarded.

pub mod error;
pub mod json;
pub mod scryfall;

pub use error::LoaderError;
pub use json::{JsonRecordLoader, NameListLoader, RecordRow, parse_records, write_records};
pub use scryfall::{
    COMMANDER_SEARCH_URL, HttpPageFetcher, PageFetcher, ScryfallClient, ScryfallPageLoader, SearchPage,
    parse_page,
};

use crate::record::Record;
use crate::store::RecordStore;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

/// Names used when no dataset can be loaded
pub const BUILTIN_COMMANDERS: [&str; 10] = [
    "Atraxa, Praetors' Voice",
    "Edgar Markov",
    "The Ur-Dragon",
    "Kaalia of the Vast",
    "Meren of Clan Nel Toth",
    "Rhys the Redeemed",
    "Narset, Enlightened Master",
    "Prossh, Skyraider of Kher",
    "Oloro, Ageless Ascetic",
    "Animar, Soul of Elements",
];

/// Source of a complete record set
pub trait RecordLoader: Send + Sync {
    /// Short description for logs and messages
    fn describe(&self) -> String;

    /// Produce the records
    ///
    /// # Errors
    ///
    /// Returns `LoaderError` if the source cannot be read or parsed.
    fn load(&self) -> Result<Vec<Record>, LoaderError>;
}

/// Drop records whose name was already seen, keeping the first
#[must_use]
pub fn dedup_records(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.name().to_string());
            if !fresh {
                warn!(card = r.name(), "Duplicate record name, keeping the first");
            }
            fresh
        })
        .collect()
}

/// The built-in commander list
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLoader;

impl RecordLoader for BuiltinLoader {
    fn describe(&self) -> String {
        "built-in commander list".to_string()
    }

    fn load(&self) -> Result<Vec<Record>, LoaderError> {
        Ok(BUILTIN_COMMANDERS
            .iter()
            .filter_map(|name| Record::name_only(name).ok())
            .collect())
    }
}

/// Tries each loader in turn
///
/// The first loader to return a non-empty record set wins. Failures and
/// empty results are logged and the next loader is tried.
#[derive(Default)]
pub struct FallbackLoader {
    chain: Vec<Box<dyn RecordLoader>>,
}

impl FallbackLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a loader to the chain
    #[must_use]
    pub fn then(mut self, loader: impl RecordLoader + 'static) -> Self {
        self.chain.push(Box::new(loader));
        self
    }

    /// Record file, then name list, then the built-in list
    #[must_use]
    pub fn standard(data_file: Option<PathBuf>, names_file: Option<PathBuf>) -> Self {
        let mut chain = Self::new();
        if let Some(path) = data_file {
            chain = chain.then(JsonRecordLoader::new(path));
        }
        if let Some(path) = names_file {
            chain = chain.then(NameListLoader::new(path));
        }
        chain.then(BuiltinLoader)
    }
}

impl RecordLoader for FallbackLoader {
    fn describe(&self) -> String {
        let parts: Vec<String> = self.chain.iter().map(|l| l.describe()).collect();
        format!("first of [{}]", parts.join(", "))
    }

    fn load(&self) -> Result<Vec<Record>, LoaderError> {
        for loader in &self.chain {
            match loader.load() {
                Ok(records) if !records.is_empty() => {
                    info!(source = %loader.describe(), records = records.len(), "Dataset loaded");
                    return Ok(records);
                }
                Ok(_) => warn!(source = %loader.describe(), "Loader produced no records"),
                Err(e) => warn!(source = %loader.describe(), error = %e, "Loader failed"),
            }
        }
        Err(LoaderError::Exhausted)
    }
}

/// Run `loader` on a background thread and publish its records
///
/// The load ticket is taken before the thread starts, so when several loads
/// overlap the most recently started one that completes wins. The handle
/// yields whether the records were installed; a failed load leaves the
/// store unchanged.
pub fn spawn_load(
    store: &Arc<RecordStore>,
    loader: Arc<dyn RecordLoader>,
) -> JoinHandle<Result<bool, LoaderError>> {
    let ticket = store.begin_load();
    let store = Arc::clone(store);
    thread::spawn(move || {
        let records = loader.load()?;
        Ok(store.publish(ticket, records))
    })
}
