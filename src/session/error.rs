//! Selection session error types
//!
//! Every error here is a rejected operation: the session state is left
//! exactly as it was before the call.

use thiserror::Error;

/// Rejected session operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The operation does not apply to the current phase
    #[error("Cannot {operation} while {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: &'static str,
    },

    /// A partner pick named a card that cannot partner with the primary
    #[error("'{0}' is not an eligible partner")]
    NotPartnerEligible(String),

    /// A sole-candidate pick was requested with zero or several candidates
    #[error("Expected exactly one candidate, found {0}")]
    NoSoleCandidate(usize),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
