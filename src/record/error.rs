//! Record-specific error types
//!
//! Errors raised while constructing a [`Record`](super::Record) or parsing one
//! of its fields. Loaders turn these into skipped rows, so none of them are
//! fatal for a dataset load.

use thiserror::Error;

/// Record construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The card name was empty after trimming
    #[error("Record name must not be empty")]
    EmptyName,

    /// A color identity contained a symbol outside W/U/B/R/G
    #[error("Unknown color symbol '{0}'")]
    UnknownColor(char),

    /// A color identity listed the same symbol twice
    #[error("Duplicate color symbol '{0}'")]
    DuplicateColor(char),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
