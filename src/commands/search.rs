//! Search commands - prefix, fuzzy and closest-match lookups

use crate::{FetchrError, output, search::SearchEngine, store::IndexScope};
use colored::Colorize;

type Result<T> = std::result::Result<T, FetchrError>;

/// Lines printed for a prefix lookup
#[must_use]
pub fn prefix_lines(engine: &SearchEngine, letters: &str, partners: bool, quiet: bool) -> Vec<String> {
    let scope = if partners {
        IndexScope::PartnerEligible
    } else {
        IndexScope::All
    };
    let results = engine.refilter(letters, scope);
    if results.is_empty() && !quiet {
        return vec![output::no_results(letters)];
    }
    output::record_lines(&results, quiet)
}

/// Lines printed for a fuzzy search
#[must_use]
pub fn search_lines(engine: &SearchEngine, query: &str, quiet: bool) -> Vec<String> {
    let results = engine.fuzzy_search(query);
    if results.is_empty() && !quiet {
        return vec![output::no_results(query)];
    }
    output::record_lines(&results, quiet)
}

/// Lines printed for a closest-match lookup
///
/// Text too far from every name but mentioning one (or part of one) lists
/// the names it mentions instead.
#[must_use]
pub fn closest_lines(engine: &SearchEngine, query: &str, quiet: bool) -> Vec<String> {
    if let Some(record) = engine.closest_match(query) {
        return vec![output::record_line(&record, quiet)];
    }

    if engine.contains(query) {
        let mut lines = Vec::new();
        if !quiet {
            lines.push("No close match; mentions:".dimmed().to_string());
        }
        lines.extend(output::record_lines(&engine.fuzzy_search(query), quiet));
        return lines;
    }

    if quiet {
        Vec::new()
    } else {
        vec!["no match".to_string()]
    }
}

/// Execute the prefix command
///
/// # Errors
/// Returns `FetchrError::InvalidInput` for an empty prefix
pub fn execute_prefix(engine: &SearchEngine, letters: &str, partners: bool, quiet: bool) -> Result<()> {
    if letters.is_empty() {
        return Err(FetchrError::InvalidInput("Prefix must not be empty".into()));
    }
    print_lines(&prefix_lines(engine, letters, partners, quiet));
    Ok(())
}

/// Execute the search command
///
/// # Errors
/// Returns `FetchrError::InvalidInput` for a blank query
pub fn execute_search(engine: &SearchEngine, query: &str, quiet: bool) -> Result<()> {
    if query.trim().is_empty() {
        return Err(FetchrError::InvalidInput("Search query must not be blank".into()));
    }
    print_lines(&search_lines(engine, query, quiet));
    Ok(())
}

/// Execute the closest command
///
/// # Errors
/// Returns `FetchrError::InvalidInput` for a blank query
pub fn execute_closest(engine: &SearchEngine, query: &str, quiet: bool) -> Result<()> {
    if query.trim().is_empty() {
        return Err(FetchrError::InvalidInput("Query must not be blank".into()));
    }
    print_lines(&closest_lines(engine, query, quiet));
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_engine;

    #[test]
    fn test_prefix_lines() {
        let engine = fixture_engine();
        assert_eq!(
            prefix_lines(&engine, "th", false, true),
            vec!["The Ur-Dragon", "Thrasios, Triton Hero"]
        );
        assert_eq!(
            prefix_lines(&engine, "th", true, true),
            vec!["Thrasios, Triton Hero"]
        );
    }

    #[test]
    fn test_prefix_no_results() {
        let engine = fixture_engine();
        assert!(prefix_lines(&engine, "x", false, true).is_empty());
        assert_eq!(prefix_lines(&engine, "x", false, false).len(), 1);
    }

    #[test]
    fn test_search_lines() {
        let engine = fixture_engine();
        assert_eq!(search_lines(&engine, "markov", true), vec!["Edgar Markov"]);
    }

    #[test]
    fn test_closest_lines() {
        let engine = fixture_engine();
        assert_eq!(closest_lines(&engine, "tymna the weavr", true), vec!["Tymna the Weaver"]);
        assert!(closest_lines(&engine, "qqqq", true).is_empty());
        assert_eq!(closest_lines(&engine, "qqqq", false), vec!["no match"]);
    }

    #[test]
    fn test_closest_lines_lists_mentioned_names() {
        let engine = fixture_engine();
        assert_eq!(
            closest_lines(&engine, "my deck: Edgar Markov vampires", true),
            vec!["Edgar Markov"]
        );
        assert_eq!(closest_lines(&engine, "edgar", true), vec!["Edgar Markov"]);
        assert_eq!(closest_lines(&engine, "edgar", false).len(), 2);
    }

    #[test]
    fn test_empty_prefix_is_invalid() {
        let engine = fixture_engine();
        assert!(matches!(
            execute_prefix(&engine, "", false, true),
            Err(FetchrError::InvalidInput(_))
        ));
        assert!(execute_search(&engine, "  ", true).is_err());
        assert!(execute_closest(&engine, "", true).is_err());
    }
}
