//! Fetchr - commander name search with partner resolution
//!
//! This library loads a dataset of commander cards, indexes the names by
//! first letter, and answers prefix, fuzzy and closest-match queries. A
//! selection session drives the pick of a primary commander and, where the
//! card allows it, a partner.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod loader;
pub mod output;
pub mod partner;
pub mod record;
pub mod search;
pub mod session;
pub mod store;

#[cfg(test)]
pub mod testing;

pub use partner::{PartnerDecision, classify};
pub use record::{ColorIdentity, PartnerKind, Record};
pub use search::SearchEngine;
pub use session::{Phase, SelectionSession};
pub use store::RecordStore;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum FetchrError {
    /// Record construction error
    #[error("Record error: {0}")]
    RecordError(#[from] record::RecordError),
    /// Dataset loading error
    #[error("Loader error: {0}")]
    LoaderError(#[from] loader::LoaderError),
    /// Selection session error
    #[error("Session error: {0}")]
    SessionError(#[from] session::SessionError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Interactive prompt error
    #[error("Prompt error: {0}")]
    PromptError(#[from] dialoguer::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
