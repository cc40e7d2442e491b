//! Record store with atomic snapshot swaps
//!
//! The store owns the current [`Snapshot`] behind an `RwLock<Arc<_>>`. A load
//! builds the complete replacement snapshot outside the lock and swaps the
//! pointer in one step, so readers only ever see a whole old set or a whole
//! new one.
//!
//! Loads are ticketed. [`RecordStore::begin_load`] hands out increasing
//! tickets and [`RecordStore::publish`] refuses a result whose ticket is
//! older than the snapshot already installed, which gives last-load-wins
//! behavior when several loads are in flight.

pub mod snapshot;
pub mod stats;

pub use snapshot::{IndexScope, LetterIndex, Snapshot, compare_names};
pub use stats::StoreStats;

use crate::record::Record;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Handle for one in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Owner of the current record snapshot
#[derive(Debug, Default)]
pub struct RecordStore {
    current: RwLock<Arc<Snapshot>>,
    issued: AtomicU64,
}

impl RecordStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `records`
    #[must_use]
    pub fn with_records(records: Vec<Record>) -> Self {
        let store = Self::new();
        store.load(records);
        store
    }

    /// The current snapshot
    ///
    /// Hold on to the returned `Arc` for a consistent view across several
    /// queries; a concurrent load will not affect it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Ticket of the installed snapshot
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.snapshot().ticket()
    }

    /// Replace the whole record set, returning the new generation
    pub fn load(&self, records: Vec<Record>) -> u64 {
        let ticket = self.begin_load();
        self.publish(ticket, records);
        ticket.id()
    }

    /// Reset to the empty state
    pub fn clear(&self) {
        self.load(Vec::new());
    }

    /// Reserve a ticket for a load that will publish later
    pub fn begin_load(&self) -> LoadTicket {
        let id = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(ticket = id, "Load started");
        LoadTicket(id)
    }

    /// Install the result of a load
    ///
    /// Returns `false` and discards `records` if a load with a newer ticket
    /// has already been published.
    pub fn publish(&self, ticket: LoadTicket, records: Vec<Record>) -> bool {
        if ticket.id() <= self.generation() {
            warn!(ticket = ticket.id(), "Discarding superseded load");
            return false;
        }

        let snapshot = Arc::new(Snapshot::build(records, ticket.id()));
        for (name, partner) in snapshot.unresolved_fixed_partners() {
            warn!(record = name, partner, "Fixed partner is not in the dataset");
        }

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        // Re-check under the write lock; another publish may have won meanwhile.
        if ticket.id() <= current.ticket() {
            warn!(ticket = ticket.id(), "Discarding superseded load");
            return false;
        }
        info!(
            ticket = ticket.id(),
            records = snapshot.len(),
            partners = snapshot.partner_eligible_names().len(),
            "Record set loaded"
        );
        *current = snapshot;
        true
    }
}
