//! Immutable record set with derived indexes
//!
//! A [`Snapshot`] is built once per load and never mutated afterwards. All
//! indexes are derived from the record list at build time:
//! - `letters`: uppercased first letter → names, case-insensitively sorted
//! - `partner_letters`: same grouping, partner-eligible records only
//! - `by_color`: canonical WUBRG symbols → record positions
//! - `by_mana_value`: mana value → record positions

use super::stats::StoreStats;
use crate::record::{ColorIdentity, PartnerKind, Record, format_commander_name, index_letter};
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Letter → sorted names mapping
pub type LetterIndex = BTreeMap<String, Vec<String>>;

/// Which letter index a prefix lookup runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexScope {
    /// Every record
    #[default]
    All,
    /// Only records with a partner ability
    PartnerEligible,
}

/// Case-insensitive name ordering with a case-sensitive tie break
///
/// The tie break keeps the order total when two names differ only in case.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// One complete, immutable load of the dataset
#[derive(Debug, Default)]
pub struct Snapshot {
    ticket: u64,
    records: Vec<Record>,
    by_name: HashMap<String, usize>,
    letters: LetterIndex,
    partner_letters: LetterIndex,
    by_color: HashMap<String, Vec<usize>>,
    by_mana_value: BTreeMap<u32, Vec<usize>>,
}

impl Snapshot {
    /// Build a snapshot and all of its indexes
    ///
    /// Records are sorted case-insensitively by name. When two records share
    /// a name the first one wins.
    #[must_use]
    pub fn build(records: Vec<Record>, ticket: u64) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        let mut records: Vec<Record> = records
            .into_iter()
            .filter(|r| seen.insert(r.name().to_string()))
            .collect();
        records.sort_by_cached_key(|r| (r.name().to_lowercase(), r.name().to_string()));

        let mut by_name = HashMap::with_capacity(records.len());
        let mut letters = LetterIndex::new();
        let mut partner_letters = LetterIndex::new();
        let mut by_color: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_mana_value: BTreeMap<u32, Vec<usize>> = BTreeMap::new();

        // Records are already sorted, so pushing in order keeps every group sorted.
        for (pos, record) in records.iter().enumerate() {
            by_name.insert(record.name().to_string(), pos);

            if let Some(letter) = index_letter(record.name()) {
                if record.partner().is_eligible() {
                    partner_letters
                        .entry(letter.clone())
                        .or_default()
                        .push(record.name().to_string());
                }
                letters.entry(letter).or_default().push(record.name().to_string());
            }

            by_color
                .entry(record.colors().canonical().symbols())
                .or_default()
                .push(pos);
            by_mana_value.entry(record.mana_value()).or_default().push(pos);
        }

        Self {
            ticket,
            records,
            by_name,
            letters,
            partner_letters,
            by_color,
            by_mana_value,
        }
    }

    /// Ticket of the load that produced this snapshot (0 for the initial empty one)
    #[must_use]
    pub const fn ticket(&self) -> u64 {
        self.ticket
    }

    /// All records, case-insensitively sorted by name
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Names grouped by uppercased first letter
    #[must_use]
    pub const fn letters_index(&self) -> &LetterIndex {
        &self.letters
    }

    /// Partner-eligible names grouped like [`Self::letters_index`]
    #[must_use]
    pub const fn partner_letters_index(&self) -> &LetterIndex {
        &self.partner_letters
    }

    /// The letter index for a scope
    #[must_use]
    pub const fn index(&self, scope: IndexScope) -> &LetterIndex {
        match scope {
            IndexScope::All => &self.letters,
            IndexScope::PartnerEligible => &self.partner_letters,
        }
    }

    /// Names in one letter group, empty when the letter has none
    #[must_use]
    pub fn letter_group(&self, letter: &str, scope: IndexScope) -> &[String] {
        self.index(scope).get(letter).map(Vec::as_slice).unwrap_or_default()
    }

    /// Partner-eligible names in letter-group order
    #[must_use]
    pub fn partner_eligible_names(&self) -> Vec<&str> {
        self.partner_letters
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Exact, case-sensitive lookup on the stored name
    #[must_use]
    pub fn record_by_name(&self, name: &str) -> Option<&Record> {
        self.by_name.get(name).map(|&pos| &self.records[pos])
    }

    /// Records whose color identity matches `identity` regardless of symbol order
    #[must_use]
    pub fn records_by_color(&self, identity: &ColorIdentity) -> Vec<&Record> {
        self.positions(self.by_color.get(&identity.canonical().symbols()))
    }

    /// Records with the given mana value
    #[must_use]
    pub fn records_by_mana_value(&self, mana_value: u32) -> Vec<&Record> {
        self.positions(self.by_mana_value.get(&mana_value))
    }

    fn positions(&self, positions: Option<&Vec<usize>>) -> Vec<&Record> {
        positions
            .map(|p| p.iter().map(|&pos| &self.records[pos]).collect())
            .unwrap_or_default()
    }

    /// Whether `value` mentions a known name or a known name mentions `value`
    ///
    /// Case-insensitive. A blank value matches nothing.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        let cleaned = format_commander_name(value).to_lowercase();
        if cleaned.is_empty() {
            return false;
        }
        self.records.iter().any(|r| {
            let name = r.name().to_lowercase();
            cleaned.contains(&name) || name.contains(&cleaned)
        })
    }

    /// Fixed partners that name a card missing from this snapshot
    #[must_use]
    pub fn unresolved_fixed_partners(&self) -> Vec<(&str, &str)> {
        self.records
            .iter()
            .filter_map(|r| match r.partner() {
                PartnerKind::FixedPartner(partner) if !self.by_name.contains_key(partner) => {
                    Some((r.name(), partner.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// Up to `count` distinct records in random order
    #[must_use]
    pub fn random_records(&self, count: usize) -> Vec<&Record> {
        self.random_records_with(count, &mut rand::thread_rng())
    }

    /// [`Self::random_records`] drawing from `rng`
    #[must_use]
    pub fn random_records_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&Record> {
        self.records.choose_multiple(rng, count).collect()
    }

    /// Summary statistics
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats::from_records(&self.records)
    }
}
