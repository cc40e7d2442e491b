//! Output formatting for CLI display
//!
//! This module provides utilities for formatting records, partner decisions
//! and dataset statistics. With `quiet` set, only bare names are produced.

use crate::partner::PartnerDecision;
use crate::record::{Color, ColorIdentity, PartnerKind, Record};
use crate::store::StoreStats;
use colored::{ColoredString, Colorize};

fn colorize_symbol(color: Color) -> ColoredString {
    let symbol = color.symbol().to_string();
    match color {
        Color::White => symbol.bright_white(),
        Color::Blue => symbol.blue(),
        Color::Black => symbol.purple(),
        Color::Red => symbol.red(),
        Color::Green => symbol.green(),
    }
}

/// Color identity as colored symbols, `C` when colorless
#[must_use]
pub fn color_symbols(identity: &ColorIdentity) -> String {
    if identity.is_empty() {
        return "C".dimmed().to_string();
    }
    identity
        .canonical()
        .colors()
        .iter()
        .map(|c| colorize_symbol(*c).to_string())
        .collect()
}

/// Format a record for display
#[must_use]
pub fn record_line(record: &Record, quiet: bool) -> String {
    if quiet {
        return record.name().to_string();
    }

    let mut line = format!(
        "  {} [{}] {}",
        record.name().bold(),
        color_symbols(record.colors()),
        format!("mv {}", record.mana_value()).dimmed()
    );
    match record.partner() {
        PartnerKind::None => {}
        PartnerKind::OpenPartner => line.push_str(&format!(" {}", "partner".cyan())),
        PartnerKind::FixedPartner(partner) => {
            line.push_str(&format!(" {}", format!("partner with {partner}").cyan()));
        }
    }
    line
}

/// Format a list of records, one per line
#[must_use]
pub fn record_lines(records: &[Record], quiet: bool) -> Vec<String> {
    records.iter().map(|r| record_line(r, quiet)).collect()
}

/// Message printed when a query had no results
#[must_use]
pub fn no_results(query: &str) -> String {
    format!("No commanders match '{query}'").yellow().to_string()
}

/// Describe a partner decision
#[must_use]
pub fn decision_line(name: &str, decision: &PartnerDecision) -> String {
    match decision {
        PartnerDecision::NoPartner => format!("{} has no partner", name.bold()),
        PartnerDecision::MustOfferChoice => {
            format!("{} may take a partner", name.bold())
        }
        PartnerDecision::SuggestFixed(partner) => {
            format!("{} partners with {}", name.bold(), partner.cyan())
        }
        PartnerDecision::OpenChoiceRequired => {
            format!("{} can partner with any other partner commander", name.bold())
        }
    }
}

/// Format dataset statistics
#[must_use]
pub fn stats_lines(stats: &StoreStats) -> Vec<String> {
    vec![
        format!("{} {}", "Commanders:".bold(), stats.total),
        format!("{} {}", "Color identities:".bold(), stats.unique_color_identities),
        format!("{} {}", "Average mana value:".bold(), stats.formatted_average()),
        format!("{} {}", "Colorless:".bold(), stats.colorless),
        format!(
            "{} {} ({:.1}%)",
            "Multicolor:".bold(),
            stats.multicolor,
            stats.multicolor_percentage()
        ),
        format!("{} {}", "Partner capable:".bold(), stats.partner_capable),
        format!(
            "{} {}",
            "By color:".bold(),
            stats
                .per_color
                .iter()
                .map(|(color, count)| format!("{} {count}", colorize_symbol(*color)))
                .collect::<Vec<_>>()
                .join("  ")
        ),
    ]
}

/// Final pick line
#[must_use]
pub fn selection_line(composite: &str, quiet: bool) -> String {
    if quiet {
        composite.to_string()
    } else {
        format!("{} {}", "Selected:".green().bold(), composite)
    }
}
