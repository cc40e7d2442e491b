//! List command - commanders by color identity and mana value

use crate::{
    FetchrError, output,
    record::{ColorIdentity, Record},
    search::SearchEngine,
};

type Result<T> = std::result::Result<T, FetchrError>;

/// Parse a color filter; `C` (any case) means colorless
///
/// # Errors
/// Returns `FetchrError::RecordError` for unknown or repeated symbols
pub fn parse_color_filter(value: &str) -> Result<ColorIdentity> {
    if value.trim().eq_ignore_ascii_case("c") {
        return Ok(ColorIdentity::colorless());
    }
    Ok(ColorIdentity::parse(value)?)
}

/// Records matching both filters, in name order
///
/// # Errors
/// Returns an error if the color filter does not parse
pub fn matching(engine: &SearchEngine, color: Option<&str>, cmc: Option<u32>) -> Result<Vec<Record>> {
    let snapshot = engine.snapshot();
    let identity = color.map(parse_color_filter).transpose()?;

    let records = match (&identity, cmc) {
        (Some(identity), _) => snapshot.records_by_color(identity),
        (None, Some(cmc)) => snapshot.records_by_mana_value(cmc),
        (None, None) => snapshot.records().iter().collect(),
    };

    Ok(records
        .into_iter()
        .filter(|r| cmc.is_none_or(|n| r.mana_value() == n))
        .cloned()
        .collect())
}

/// Heading printed above a color-filtered listing
///
/// Multicolor identities also spell out their colors.
#[must_use]
pub fn heading(identity: &ColorIdentity) -> String {
    if identity.len() > 1 {
        format!("{} commanders ({}):", identity.combination_name(), identity.description())
    } else {
        format!("{} commanders:", identity.description())
    }
}

/// Execute the list command
///
/// # Errors
/// Returns an error if the color filter does not parse
pub fn execute(engine: &SearchEngine, color: Option<&str>, cmc: Option<u32>, quiet: bool) -> Result<()> {
    let records = matching(engine, color, cmc)?;

    if records.is_empty() {
        if !quiet {
            println!("No commanders found.");
        }
        return Ok(());
    }

    if !quiet {
        if let Some(identity) = color.map(parse_color_filter).transpose()? {
            println!("{}", heading(&identity));
        } else {
            println!("Commanders:");
        }
    }
    for line in output::record_lines(&records, quiet) {
        println!("{line}");
    }
    Ok(())
}
