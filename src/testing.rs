//! Testing utilities for fetchr
//!
//! Builders for records and a small fixture dataset covering every partner
//! flavor, plus a helper for writing JSON to a temporary file.
//!
//! Only available when compiled with `cfg(test)`.

use crate::record::{ColorIdentity, PartnerKind, Record};
use crate::search::SearchEngine;
use crate::store::RecordStore;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Build a record without a partner ability
///
/// # Panics
/// Panics if the name is blank or the color symbols are invalid.
#[must_use]
pub fn record(name: &str, colors: &str, mana_value: u32) -> Record {
    Record::new(
        name,
        ColorIdentity::parse(colors).expect("valid test colors"),
        mana_value,
        PartnerKind::None,
    )
    .expect("valid test record")
}

fn partnered(name: &str, colors: &str, mana_value: u32, partner: PartnerKind) -> Record {
    Record::new(
        name,
        ColorIdentity::parse(colors).expect("valid test colors"),
        mana_value,
        partner,
    )
    .expect("valid test record")
}

/// The fixture dataset, in sorted name order
///
/// Holds plain commanders, three open partners and one fixed partner pair.
#[must_use]
pub fn fixture_records() -> Vec<Record> {
    vec![
        record("Animar, Soul of Elements", "URG", 3),
        record("Atraxa, Praetors' Voice", "WUBG", 4),
        record("Edgar Markov", "WBR", 6),
        partnered("Kraum, Ludevic's Opus", "UR", 5, PartnerKind::OpenPartner),
        partnered(
            "Pir, Imaginative Rascal",
            "G",
            3,
            PartnerKind::FixedPartner("Toothy, Imaginary Friend".into()),
        ),
        record("The Ur-Dragon", "WUBRG", 9),
        partnered("Thrasios, Triton Hero", "GU", 4, PartnerKind::OpenPartner),
        partnered(
            "Toothy, Imaginary Friend",
            "U",
            4,
            PartnerKind::FixedPartner("Pir, Imaginative Rascal".into()),
        ),
        partnered("Tymna the Weaver", "WB", 3, PartnerKind::OpenPartner),
    ]
}

/// A search engine over [`fixture_records`]
#[must_use]
pub fn fixture_engine() -> SearchEngine {
    SearchEngine::new(Arc::new(RecordStore::with_records(fixture_records())))
}

/// Write `contents` to a fresh temporary `.json` file
///
/// The file is removed when the returned handle is dropped.
///
/// # Panics
/// Panics if the temporary file cannot be created or written.
#[must_use]
pub fn write_temp_json(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::compare_names;

    #[test]
    fn test_fixture_is_sorted_and_unique() {
        let records = fixture_records();
        for pair in records.windows(2) {
            assert_eq!(
                compare_names(pair[0].name(), pair[1].name()),
                std::cmp::Ordering::Less
            );
        }
    }

    #[test]
    fn test_fixture_partners_resolve() {
        let engine = fixture_engine();
        assert!(engine.snapshot().unresolved_fixed_partners().is_empty());
    }

    #[test]
    fn test_write_temp_json() {
        let file = write_temp_json("[]");
        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "[]");
    }
}
