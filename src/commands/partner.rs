//! Partner command - show how a commander pairs
//!
//! Given one name, prints the partner decision and options. Given a pairing
//! such as `"Kraum, Ludevic's Opus // Tymna the Weaver"`, checks that the
//! second name is a valid partner for the first.

use colored::Colorize;

use crate::{
    FetchrError, output,
    partner::{classify, partner_options},
    record::{compose_pair, format_commander_name, is_partner_pair, partner_name, primary_name},
    search::SearchEngine,
};

type Result<T> = std::result::Result<T, FetchrError>;

/// Lines printed for `name`
///
/// # Errors
/// Returns `FetchrError::InvalidInput` if no loaded commander has this name
pub fn lines(engine: &SearchEngine, name: &str, quiet: bool) -> Result<Vec<String>> {
    let snapshot = engine.snapshot();
    let name = format_commander_name(name);
    let primary = primary_name(&name);
    let record = snapshot.record_by_name(primary).ok_or_else(|| {
        let hint = engine
            .closest_match(primary)
            .map(|r| format!(" Did you mean '{}'?", r.name()))
            .unwrap_or_default();
        FetchrError::InvalidInput(format!("Unknown commander '{primary}'.{hint}"))
    })?;

    let options = partner_options(record, &snapshot);

    let partner = is_partner_pair(&name)
        .then(|| partner_name(&name))
        .flatten()
        .filter(|p| !p.is_empty());
    if let Some(partner) = partner {
        if !options.iter().any(|option| option == partner) {
            return Err(FetchrError::InvalidInput(format!(
                "'{partner}' cannot partner with '{}'",
                record.name()
            )));
        }
        let composite = compose_pair(record.name(), Some(partner));
        return Ok(vec![if quiet {
            composite
        } else {
            format!("{} is a valid pairing", composite.green())
        }]);
    }

    if quiet {
        return Ok(options);
    }

    let mut lines = vec![output::decision_line(record.name(), &classify(record))];
    lines.extend(options.iter().map(|option| format!("  {option}")));
    Ok(lines)
}

/// Execute the partner command
///
/// # Errors
/// Returns `FetchrError::InvalidInput` if no loaded commander has this name
pub fn execute(engine: &SearchEngine, name: &str, quiet: bool) -> Result<()> {
    for line in lines(engine, name, quiet)? {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_engine;

    #[test]
    fn test_fixed_partner_lines() {
        let engine = fixture_engine();
        assert_eq!(
            lines(&engine, "Toothy, Imaginary Friend", true).unwrap(),
            vec!["Pir, Imaginative Rascal"]
        );
    }

    #[test]
    fn test_open_partner_lines() {
        let engine = fixture_engine();
        let options = lines(&engine, "Thrasios, Triton Hero", true).unwrap();
        assert_eq!(options, vec!["Kraum, Ludevic's Opus", "Tymna the Weaver"]);

        let verbose = lines(&engine, "Thrasios, Triton Hero", false).unwrap();
        assert_eq!(verbose.len(), 3);
    }

    #[test]
    fn test_no_partner_lines() {
        let engine = fixture_engine();
        assert!(lines(&engine, "Edgar Markov", true).unwrap().is_empty());
    }

    #[test]
    fn test_valid_pair() {
        let engine = fixture_engine();
        assert_eq!(
            lines(&engine, "Kraum, Ludevic's Opus//Tymna the Weaver", true).unwrap(),
            vec!["Kraum, Ludevic's Opus // Tymna the Weaver"]
        );
        assert_eq!(
            lines(&engine, "Pir, Imaginative Rascal // Toothy, Imaginary Friend", true).unwrap(),
            vec!["Pir, Imaginative Rascal // Toothy, Imaginary Friend"]
        );
    }

    #[test]
    fn test_invalid_pair() {
        let engine = fixture_engine();
        let err = lines(&engine, "Pir, Imaginative Rascal // Tymna the Weaver", true).unwrap_err();
        assert!(err.to_string().contains("cannot partner with 'Pir, Imaginative Rascal'"));

        assert!(lines(&engine, "Edgar Markov // Tymna the Weaver", true).is_err());
    }

    #[test]
    fn test_trailing_separator_is_single_name() {
        let engine = fixture_engine();
        assert_eq!(
            lines(&engine, "Toothy, Imaginary Friend //", true).unwrap(),
            vec!["Pir, Imaginative Rascal"]
        );
    }

    #[test]
    fn test_unknown_name_suggests() {
        let engine = fixture_engine();
        let err = lines(&engine, "Edgar Markof", true).unwrap_err();
        assert!(err.to_string().contains("Did you mean 'Edgar Markov'"));
    }
}
