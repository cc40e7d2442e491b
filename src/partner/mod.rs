//! Partner pairing decisions
//!
//! Commanders come in three flavors: most have no partner ability, some
//! name the exact card they partner with, and some have the generic
//! "Partner" ability that pairs with any other partner commander.
//! [`classify`] turns a record's [`PartnerKind`] into the prompt the picker
//! should show next.

use crate::record::{OPEN_PARTNER_SENTINEL, PartnerKind, Record};
use crate::store::Snapshot;

/// What the picker should do after a primary commander is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartnerDecision {
    /// Done: the primary stands alone
    NoPartner,
    /// Ask whether to pick a partner at all (kept for presentation layers
    /// that always ask; [`classify`] never returns it)
    MustOfferChoice,
    /// Ask to confirm this specific partner
    SuggestFixed(String),
    /// Ask whether to pick any other partner-eligible commander
    OpenChoiceRequired,
}

/// Decide the partner step for `record`
///
/// Pure function of the record's partner kind, evaluated in order:
/// a named partner is suggested, the `"partner"` sentinel or an open partner
/// requires an open choice, anything else needs no partner.
#[must_use]
pub fn classify(record: &Record) -> PartnerDecision {
    classify_kind(record.partner())
}

/// [`classify`] on a bare partner kind
#[must_use]
pub fn classify_kind(kind: &PartnerKind) -> PartnerDecision {
    match kind {
        PartnerKind::FixedPartner(name) if name != OPEN_PARTNER_SENTINEL => {
            PartnerDecision::SuggestFixed(name.clone())
        }
        PartnerKind::FixedPartner(_) | PartnerKind::OpenPartner => {
            PartnerDecision::OpenChoiceRequired
        }
        PartnerKind::None => PartnerDecision::NoPartner,
    }
}

/// Classify the record stored under `name`
///
/// A name missing from the snapshot is treated as having no partner.
#[must_use]
pub fn classify_name(snapshot: &Snapshot, name: &str) -> PartnerDecision {
    snapshot
        .record_by_name(name)
        .map_or(PartnerDecision::NoPartner, classify)
}

/// Names `record` could be paired with
///
/// A fixed partner yields just that name. An open partner yields every other
/// open-partner commander (fixed-partner cards only pair with their named
/// card). No partner yields nothing.
#[must_use]
pub fn partner_options(record: &Record, snapshot: &Snapshot) -> Vec<String> {
    match classify(record) {
        PartnerDecision::SuggestFixed(name) => vec![name],
        PartnerDecision::OpenChoiceRequired => snapshot
            .partner_eligible_names()
            .into_iter()
            .filter(|&name| name != record.name())
            .filter(|&name| {
                snapshot
                    .record_by_name(name)
                    .is_some_and(|r| classify(r) == PartnerDecision::OpenChoiceRequired)
            })
            .map(str::to_string)
            .collect(),
        PartnerDecision::NoPartner | PartnerDecision::MustOfferChoice => Vec::new(),
    }
}
