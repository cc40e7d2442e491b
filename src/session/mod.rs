//! Commander selection session
//!
//! One [`SelectionSession`] drives one pick: the user types a name letter by
//! letter, picks a candidate, answers any partner prompt, and ends with a
//! composite name such as `"Kraum, Ludevic's Opus // Tymna the Weaver"`.
//!
//! # Workflow
//!
//! ```text
//! Typing(Primary)
//!     ↓ pick
//! classify(primary)
//!     ├─ NoPartner ──────────────→ Resolved("Primary")
//!     ├─ SuggestFixed(name) → ConfirmFixedPartner
//!     │       ├─ yes ────────────→ Resolved("Primary // name")
//!     │       └─ no ─────────────→ Resolved("Primary")
//!     └─ OpenChoiceRequired → OfferOpenChoice
//!             ├─ yes → Typing(Partner) ─ pick → Resolved("Primary // Partner")
//!             └─ no ─────────────→ Resolved("Primary")
//!
//! cancel (any non-terminal phase) → Cancelled
//! ```
//!
//! The session borrows its [`SearchEngine`], so it cannot outlive the picker
//! that created it. Presentation layers observe it either by polling
//! [`SelectionSession::phase`] and [`SelectionSession::candidates`] or by
//! registering a listener with [`SelectionSession::subscribe`].

pub mod error;

pub use error::SessionError;

use crate::partner::{PartnerDecision, classify_name};
use crate::record::{OPEN_PARTNER_SENTINEL, Record, compose_pair};
use crate::search::SearchEngine;
use crate::store::IndexScope;
use tracing::debug;

/// Session result type
pub type Result<T> = std::result::Result<T, SessionError>;

/// Which pick the typing phase is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// The primary commander, searched over every record
    Primary,
    /// A partner, searched over partner-eligible records only
    Partner,
}

impl PickTarget {
    /// Letter index the refilter runs against
    #[must_use]
    pub const fn scope(self) -> IndexScope {
        match self {
            Self::Primary => IndexScope::All,
            Self::Partner => IndexScope::PartnerEligible,
        }
    }
}

/// Current step of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Collecting search letters
    Typing(PickTarget),
    /// Asking whether to use the named partner
    ConfirmFixedPartner(String),
    /// Asking whether to pick an open partner
    OfferOpenChoice,
    /// Finished with this composite name
    Resolved(String),
    /// Abandoned; no result
    Cancelled,
}

impl Phase {
    /// Short description used in errors and logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Typing(PickTarget::Primary) => "typing a commander",
            Self::Typing(PickTarget::Partner) => "typing a partner",
            Self::ConfirmFixedPartner(_) => "confirming a partner",
            Self::OfferOpenChoice => "offering a partner choice",
            Self::Resolved(_) => "resolved",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are possible
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved(_) | Self::Cancelled)
    }
}

/// Change notification sent to session listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The query buffer changed and candidates were recomputed
    QueryChanged { query: String, candidates: usize },
    /// The session moved to a new phase
    PhaseChanged(Phase),
    /// The session finished with this composite name
    Resolved(String),
    /// The session was cancelled
    Cancelled,
}

type Listener<'a> = Box<dyn FnMut(&SessionEvent) + 'a>;

/// State of one pick interaction
pub struct SelectionSession<'a> {
    engine: &'a SearchEngine,
    query: String,
    candidates: Vec<Record>,
    primary: Option<String>,
    partner: Option<String>,
    phase: Phase,
    listeners: Vec<Listener<'a>>,
}

impl<'a> SelectionSession<'a> {
    /// Open a session in the primary typing phase
    #[must_use]
    pub fn new(engine: &'a SearchEngine) -> Self {
        Self {
            engine,
            query: String::new(),
            candidates: Vec::new(),
            primary: None,
            partner: None,
            phase: Phase::Typing(PickTarget::Primary),
            listeners: Vec::new(),
        }
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'a) {
        self.listeners.push(Box::new(listener));
    }

    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Letters typed so far
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Records matching the current query
    #[must_use]
    pub fn candidates(&self) -> &[Record] {
        &self.candidates
    }

    /// Names of the current candidates
    #[must_use]
    pub fn filtered_names(&self) -> Vec<&str> {
        self.candidates.iter().map(Record::name).collect()
    }

    /// The chosen primary commander, once picked
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    /// The chosen partner, once set
    #[must_use]
    pub fn partner(&self) -> Option<&str> {
        self.partner.as_deref()
    }

    /// The composite name if the session is resolved
    #[must_use]
    pub fn composite(&self) -> Option<&str> {
        match &self.phase {
            Phase::Resolved(composite) => Some(composite.as_str()),
            _ => None,
        }
    }

    /// Append one character to the query and refilter
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside a typing phase.
    pub fn append_char(&mut self, c: char) -> Result<&[Record]> {
        let target = self.typing_target("type")?;
        self.query.push(c);
        self.refilter(target);
        Ok(&self.candidates)
    }

    /// Append several characters, refiltering once
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside a typing phase.
    pub fn append_str(&mut self, s: &str) -> Result<&[Record]> {
        let target = self.typing_target("type")?;
        self.query.push_str(s);
        self.refilter(target);
        Ok(&self.candidates)
    }

    /// Drop the last query character (if any) and refilter
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside a typing phase.
    pub fn remove_last_char(&mut self) -> Result<&[Record]> {
        let target = self.typing_target("erase")?;
        self.query.pop();
        self.refilter(target);
        Ok(&self.candidates)
    }

    /// Pick a name in the current typing phase
    ///
    /// For the primary pick the partner step is decided from the stored
    /// record; a name missing from the store resolves with the primary
    /// alone. A partner pick must name a partner-eligible record other than
    /// the primary, and resolves the session without further checks.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` outside a typing phase and
    /// `SessionError::NotPartnerEligible` for an invalid partner pick.
    pub fn pick(&mut self, name: &str) -> Result<&Phase> {
        match self.typing_target("pick")? {
            PickTarget::Primary => self.pick_primary(name),
            PickTarget::Partner => self.pick_partner(name)?,
        }
        Ok(&self.phase)
    }

    /// Pick the only remaining candidate
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoSoleCandidate` unless exactly one candidate
    /// remains, plus any error from [`Self::pick`].
    pub fn pick_sole_candidate(&mut self) -> Result<&Phase> {
        self.typing_target("pick")?;
        let name = match self.candidates.as_slice() {
            [only] => only.name().to_string(),
            others => return Err(SessionError::NoSoleCandidate(others.len())),
        };
        self.pick(&name)
    }

    /// Answer the pending yes/no partner prompt
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` when no prompt is pending.
    pub fn answer(&mut self, accept: bool) -> Result<&Phase> {
        match (&self.phase, accept) {
            (Phase::ConfirmFixedPartner(suggested), true) => {
                self.partner = Some(suggested.clone());
                self.resolve();
            }
            (Phase::OfferOpenChoice, true) => {
                self.clear_query();
                self.transition(Phase::Typing(PickTarget::Partner));
            }
            (Phase::ConfirmFixedPartner(_) | Phase::OfferOpenChoice, false) => self.resolve(),
            (phase, _) => {
                return Err(SessionError::WrongPhase {
                    operation: "answer",
                    phase: phase.label(),
                });
            }
        }
        Ok(&self.phase)
    }

    /// Abandon the session, clearing all state
    ///
    /// Cancelling an already cancelled session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongPhase` once the session is resolved.
    pub fn cancel(&mut self) -> Result<()> {
        match self.phase {
            Phase::Cancelled => return Ok(()),
            Phase::Resolved(_) => {
                return Err(SessionError::WrongPhase {
                    operation: "cancel",
                    phase: self.phase.label(),
                });
            }
            _ => {}
        }

        self.clear_query();
        self.primary = None;
        self.partner = None;
        self.transition(Phase::Cancelled);
        self.emit(&SessionEvent::Cancelled);
        Ok(())
    }

    fn typing_target(&self, operation: &'static str) -> Result<PickTarget> {
        match self.phase {
            Phase::Typing(target) => Ok(target),
            _ => Err(SessionError::WrongPhase {
                operation,
                phase: self.phase.label(),
            }),
        }
    }

    fn refilter(&mut self, target: PickTarget) {
        let mut candidates = self.engine.refilter(&self.query, target.scope());
        if target == PickTarget::Partner
            && let Some(primary) = &self.primary
        {
            candidates.retain(|r| r.name() != primary.as_str());
        }
        self.candidates = candidates;

        let event = SessionEvent::QueryChanged {
            query: self.query.clone(),
            candidates: self.candidates.len(),
        };
        self.emit(&event);
    }

    fn pick_primary(&mut self, name: &str) {
        let decision = classify_name(&self.engine.snapshot(), name);
        debug!(primary = name, ?decision, "Primary commander picked");

        self.primary = Some(name.to_string());
        self.clear_query();

        match decision {
            PartnerDecision::NoPartner => self.resolve(),
            PartnerDecision::SuggestFixed(partner) => {
                self.transition(Phase::ConfirmFixedPartner(partner));
            }
            PartnerDecision::OpenChoiceRequired | PartnerDecision::MustOfferChoice => {
                self.transition(Phase::OfferOpenChoice);
            }
        }
    }

    fn pick_partner(&mut self, name: &str) -> Result<()> {
        let snapshot = self.engine.snapshot();
        let eligible = self.primary.as_deref() != Some(name)
            && snapshot
                .record_by_name(name)
                .is_some_and(|r| r.partner().is_eligible());
        if !eligible {
            return Err(SessionError::NotPartnerEligible(name.to_string()));
        }

        debug!(partner = name, "Partner picked");
        self.partner = Some(name.to_string());
        self.clear_query();
        self.resolve();
        Ok(())
    }

    fn resolve(&mut self) {
        let primary = self.primary.as_deref().unwrap_or_default();
        let partner = self
            .partner
            .as_deref()
            .filter(|p| *p != OPEN_PARTNER_SENTINEL);
        let composite = compose_pair(primary, partner);

        self.transition(Phase::Resolved(composite.clone()));
        self.emit(&SessionEvent::Resolved(composite));
    }

    fn clear_query(&mut self) {
        self.query.clear();
        self.candidates.clear();
    }

    fn transition(&mut self, phase: Phase) {
        debug!(from = self.phase.label(), to = phase.label(), "Session phase change");
        self.phase = phase.clone();
        self.emit(&SessionEvent::PhaseChanged(phase));
    }

    fn emit(&mut self, event: &SessionEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ColorIdentity, PartnerKind};
    use crate::store::RecordStore;
    use crate::testing::{fixture_engine, fixture_records, record};
    use std::cell::RefCell;
    use std::sync::Arc;

    fn engine_with(extra: Vec<Record>) -> SearchEngine {
        let mut records = fixture_records();
        records.extend(extra);
        SearchEngine::new(Arc::new(RecordStore::with_records(records)))
    }

    fn partnered(name: &str, kind: PartnerKind) -> Record {
        Record::new(name, ColorIdentity::parse("U").unwrap(), 3, kind).unwrap()
    }

    #[test]
    fn test_typing_narrows_candidates() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);

        session.append_char('E').unwrap();
        session.append_char('D').unwrap();
        assert_eq!(session.filtered_names(), vec!["Edgar Markov"]);
        assert_eq!(session.query(), "ED");

        session.remove_last_char().unwrap();
        session.remove_last_char().unwrap();
        assert!(session.candidates().is_empty());
        // erasing an empty buffer is harmless
        session.remove_last_char().unwrap();
        assert_eq!(session.query(), "");
    }

    #[test]
    fn test_no_partner_resolves_immediately() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);
        session.append_str("ED").unwrap();

        let phase = session.pick_sole_candidate().unwrap();
        assert_eq!(phase, &Phase::Resolved("Edgar Markov".into()));
        assert_eq!(session.composite(), Some("Edgar Markov"));
    }

    #[test]
    fn test_fixed_partner_declined() {
        let engine = engine_with(vec![partnered(
            "Zeta, Friend of Thrasios",
            PartnerKind::FixedPartner("Thrasios, Triton Hero".into()),
        )]);
        let mut session = SelectionSession::new(&engine);

        let phase = session.pick("Zeta, Friend of Thrasios").unwrap();
        assert_eq!(phase, &Phase::ConfirmFixedPartner("Thrasios, Triton Hero".into()));

        session.answer(false).unwrap();
        assert_eq!(session.composite(), Some("Zeta, Friend of Thrasios"));
        assert!(!session.composite().unwrap().contains("//"));
    }

    #[test]
    fn test_fixed_partner_accepted() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);

        session.pick("Pir, Imaginative Rascal").unwrap();
        session.answer(true).unwrap();
        assert_eq!(
            session.composite(),
            Some("Pir, Imaginative Rascal // Toothy, Imaginary Friend")
        );
        assert_eq!(session.partner(), Some("Toothy, Imaginary Friend"));
    }

    #[test]
    fn test_sentinel_partner_open_choice() {
        let engine = engine_with(vec![partnered(
            "Zeta, Generic Partner",
            PartnerKind::FixedPartner("partner".into()),
        )]);
        let mut session = SelectionSession::new(&engine);

        assert_eq!(session.pick("Zeta, Generic Partner").unwrap(), &Phase::OfferOpenChoice);
        assert_eq!(session.answer(true).unwrap(), &Phase::Typing(PickTarget::Partner));

        session.append_str("ty").unwrap();
        assert_eq!(session.filtered_names(), vec!["Tymna the Weaver"]);
        session.pick("Tymna the Weaver").unwrap();
        assert_eq!(
            session.composite(),
            Some("Zeta, Generic Partner // Tymna the Weaver")
        );
    }

    #[test]
    fn test_open_choice_declined() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);

        session.pick("Tymna the Weaver").unwrap();
        session.answer(false).unwrap();
        assert_eq!(session.composite(), Some("Tymna the Weaver"));
    }

    #[test]
    fn test_partner_search_is_restricted() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);
        session.pick("Tymna the Weaver").unwrap();
        session.answer(true).unwrap();

        session.append_char('E').unwrap();
        assert!(session.candidates().is_empty());
        session.remove_last_char().unwrap();

        // the primary is not offered as its own partner
        session.append_char('T').unwrap();
        assert!(!session.filtered_names().contains(&"Tymna the Weaver"));
        assert!(session.filtered_names().contains(&"Thrasios, Triton Hero"));

        assert_eq!(
            session.pick("Edgar Markov").unwrap_err(),
            SessionError::NotPartnerEligible("Edgar Markov".into())
        );
        assert_eq!(
            session.pick("Tymna the Weaver").unwrap_err(),
            SessionError::NotPartnerEligible("Tymna the Weaver".into())
        );
        assert_eq!(session.phase(), &Phase::Typing(PickTarget::Partner));
    }

    #[test]
    fn test_unknown_primary_resolves_alone() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);
        session.pick("Not A Real Commander").unwrap();
        assert_eq!(session.composite(), Some("Not A Real Commander"));
    }

    #[test]
    fn test_cancel_clears_state() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);
        session.pick("Tymna the Weaver").unwrap();
        session.cancel().unwrap();

        assert_eq!(session.phase(), &Phase::Cancelled);
        assert_eq!(session.primary(), None);
        assert_eq!(session.composite(), None);
        assert!(session.append_char('A').is_err());
        assert!(session.cancel().is_ok());
    }

    #[test]
    fn test_cannot_cancel_after_resolve() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);
        session.pick("Edgar Markov").unwrap();

        let err = session.cancel().unwrap_err();
        assert_eq!(
            err,
            SessionError::WrongPhase {
                operation: "cancel",
                phase: "resolved"
            }
        );
        assert_eq!(session.composite(), Some("Edgar Markov"));
    }

    #[test]
    fn test_wrong_phase_operations_leave_state() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);
        assert!(session.answer(true).is_err());

        session.pick("Pir, Imaginative Rascal").unwrap();
        assert!(session.append_char('x').is_err());
        assert!(session.pick("Edgar Markov").is_err());
        assert_eq!(
            session.phase(),
            &Phase::ConfirmFixedPartner("Toothy, Imaginary Friend".into())
        );
    }

    #[test]
    fn test_pick_sole_candidate_requires_one() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);
        assert_eq!(session.pick_sole_candidate().unwrap_err(), SessionError::NoSoleCandidate(0));

        session.append_char('T').unwrap();
        let count = session.candidates().len();
        assert!(count > 1);
        assert_eq!(
            session.pick_sole_candidate().unwrap_err(),
            SessionError::NoSoleCandidate(count)
        );
    }

    #[test]
    fn test_listeners_receive_events() {
        let engine = fixture_engine();
        let events = RefCell::new(Vec::new());
        {
            let mut session = SelectionSession::new(&engine);
            session.subscribe(|e| events.borrow_mut().push(e.clone()));
            session.append_str("Ed").unwrap();
            session.pick_sole_candidate().unwrap();
        }

        let events = events.into_inner();
        assert_eq!(
            events,
            vec![
                SessionEvent::QueryChanged {
                    query: "Ed".into(),
                    candidates: 1
                },
                SessionEvent::PhaseChanged(Phase::Resolved("Edgar Markov".into())),
                SessionEvent::Resolved("Edgar Markov".into()),
            ]
        );
    }

    #[test]
    fn test_session_sees_reload() {
        let engine = fixture_engine();
        let mut session = SelectionSession::new(&engine);
        engine.load(vec![record("Ghave, Guru of Spores", "WBG", 5)]);

        session.append_char('G').unwrap();
        assert_eq!(session.filtered_names(), vec!["Ghave, Guru of Spores"]);
    }
}
