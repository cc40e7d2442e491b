//! JSON dataset format
//!
//! The record file is a JSON array with one object per card:
//!
//! ```json
//! [
//!   {
//!     "card_name": "Pir, Imaginative Rascal",
//!     "color_identity": "G",
//!     "cmc": "3",
//!     "has_partner": true,
//!     "partner_with": "Toothy, Imaginary Friend"
//!   }
//! ]
//! ```
//!
//! `cmc` may be a string or a number. `partner_with` uses the literal
//! `"partner"` for the generic partner ability. The fallback name file is a
//! plain array of names.

use super::error::LoaderError;
use super::{RecordLoader, dedup_records};
use crate::record::{ColorIdentity, PartnerKind, Record, RecordError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Mana value as it appears in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManaValue {
    Number(f64),
    Text(String),
}

impl ManaValue {
    /// Whole mana value; fractions are truncated, anything unparsable is 0
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn value(&self) -> u32 {
        let raw = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        };
        if raw.is_finite() && raw > 0.0 {
            raw.min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    }
}

impl Default for ManaValue {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

/// One row of the record file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub card_name: String,
    #[serde(default)]
    pub color_identity: String,
    #[serde(default)]
    pub cmc: ManaValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_partner: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_with: Option<String>,
}

impl TryFrom<RecordRow> for Record {
    type Error = RecordError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let colors = ColorIdentity::parse(&row.color_identity)?;
        let partner = PartnerKind::from_raw(row.has_partner, row.partner_with.as_deref());
        Self::new(&row.card_name, colors, row.cmc.value(), partner)
    }
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        Self {
            card_name: record.name().to_string(),
            color_identity: record.colors().symbols(),
            cmc: ManaValue::Text(record.mana_value().to_string()),
            has_partner: Some(record.partner().is_eligible()),
            partner_with: record.partner().partner_with().map(str::to_string),
        }
    }
}

/// Convert rows, skipping invalid ones with a warning
#[must_use]
pub fn rows_to_records(rows: Vec<RecordRow>) -> Vec<Record> {
    let records = rows
        .into_iter()
        .filter_map(|row| {
            let name = row.card_name.clone();
            match Record::try_from(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(card = %name, error = %e, "Skipping invalid record row");
                    None
                }
            }
        })
        .collect();
    dedup_records(records)
}

/// Parse a record file's contents
///
/// # Errors
///
/// Returns the `serde_json` error if `json` is not an array of rows.
pub fn parse_records(json: &str) -> Result<Vec<Record>, serde_json::Error> {
    let rows: Vec<RecordRow> = serde_json::from_str(json)?;
    Ok(rows_to_records(rows))
}

fn read(path: &Path) -> Result<Vec<u8>, LoaderError> {
    fs::read(path).map_err(|e| LoaderError::io(path, e))
}

/// Write records in the record file format
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns `LoaderError` if serialization or any filesystem step fails.
pub fn write_records(path: &Path, records: &[Record]) -> Result<(), LoaderError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| LoaderError::io(parent, e))?;
    }

    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    let data = serde_json::to_vec_pretty(&rows).map_err(|e| LoaderError::json(path, e))?;
    fs::write(path, data).map_err(|e| LoaderError::io(path, e))?;

    info!(path = %path.display(), records = records.len(), "Records written");
    Ok(())
}

/// Loads the full record file
#[derive(Debug, Clone)]
pub struct JsonRecordLoader {
    path: PathBuf,
}

impl JsonRecordLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordLoader for JsonRecordLoader {
    fn describe(&self) -> String {
        format!("record file {}", self.path.display())
    }

    fn load(&self) -> Result<Vec<Record>, LoaderError> {
        let data = read(&self.path)?;
        let rows: Vec<RecordRow> =
            serde_json::from_slice(&data).map_err(|e| LoaderError::json(&self.path, e))?;
        Ok(rows_to_records(rows))
    }
}

/// Loads a plain array of names
///
/// Every record is colorless with mana value 0 and no partner.
#[derive(Debug, Clone)]
pub struct NameListLoader {
    path: PathBuf,
}

impl NameListLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordLoader for NameListLoader {
    fn describe(&self) -> String {
        format!("name list {}", self.path.display())
    }

    fn load(&self) -> Result<Vec<Record>, LoaderError> {
        let data = read(&self.path)?;
        let names: Vec<String> =
            serde_json::from_slice(&data).map_err(|e| LoaderError::json(&self.path, e))?;
        let records = names
            .iter()
            .filter_map(|name| Record::name_only(name).ok())
            .collect();
        Ok(dedup_records(records))
    }
}
