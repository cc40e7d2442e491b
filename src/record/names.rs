//! Commander name helpers
//!
//! A picked pairing is rendered as `"Primary // Partner"`. These helpers
//! normalize user-entered names and take pairings apart again.

/// Separator between a primary commander and its partner
pub const PAIR_SEPARATOR: &str = " // ";

/// Trim a name and normalize any `//` pairing to `"A // B"`
#[must_use]
pub fn format_commander_name(value: &str) -> String {
    let cleaned = value.trim();
    if cleaned.contains("//") {
        cleaned
            .split("//")
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(PAIR_SEPARATOR)
    } else {
        cleaned.to_string()
    }
}

/// Whether the value names a primary/partner pairing
#[must_use]
pub fn is_partner_pair(value: &str) -> bool {
    value.contains("//")
}

/// The primary commander of a pairing, or the trimmed value itself
#[must_use]
pub fn primary_name(value: &str) -> &str {
    value.split("//").next().unwrap_or(value).trim()
}

/// The partner of a pairing, if the value is one
#[must_use]
pub fn partner_name(value: &str) -> Option<&str> {
    value.split("//").nth(1).map(str::trim)
}

/// Join a primary and optional partner into the displayed composite
///
/// An empty partner is treated as absent.
#[must_use]
pub fn compose_pair(primary: &str, partner: Option<&str>) -> String {
    match partner.map(str::trim).filter(|p| !p.is_empty()) {
        Some(partner) => format!("{primary}{PAIR_SEPARATOR}{partner}"),
        None => primary.to_string(),
    }
}
