//! Unit tests for session error types

#[cfg(test)]
mod tests {
    use crate::session::error::SessionError;

    #[test]
    fn test_wrong_phase_error() {
        let error = SessionError::WrongPhase {
            operation: "pick",
            phase: "resolved",
        };
        assert_eq!(error.to_string(), "Cannot pick while resolved");
    }

    #[test]
    fn test_not_partner_eligible_error() {
        let error = SessionError::NotPartnerEligible("Edgar Markov".to_string());
        assert_eq!(error.to_string(), "'Edgar Markov' is not an eligible partner");
    }

    #[test]
    fn test_no_sole_candidate_error() {
        let error = SessionError::NoSoleCandidate(3);
        let display = format!("{error}");
        assert!(display.contains("exactly one"));
        assert!(display.contains('3'));
    }

    #[test]
    fn test_error_debug() {
        let error = SessionError::NoSoleCandidate(0);
        assert!(format!("{error:?}").contains("NoSoleCandidate"));
    }
}
