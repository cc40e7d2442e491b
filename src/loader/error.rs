//! Loader-specific error types
//!
//! A failed load never touches the record store: the caller decides whether
//! to keep the previous snapshot or fall back to another loader.

use std::path::PathBuf;
use thiserror::Error;

/// Dataset loading errors
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The dataset file could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not valid JSON of the expected shape
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A search page request failed or its body was not a search page
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The search API answered with an error status
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Paging did not reach the last page within the limit
    #[error("Stopped after {limit} pages without reaching the last one")]
    PageLimit { limit: usize },

    /// Every loader in a fallback chain failed
    #[error("No loader produced any records")]
    Exhausted,
}

impl LoaderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
