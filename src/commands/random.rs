//! Random command - commander suggestions

use crate::{FetchrError, output, record::Record, search::SearchEngine};

type Result<T> = std::result::Result<T, FetchrError>;

/// Default number of suggestions
pub const DEFAULT_SUGGESTIONS: usize = 5;

/// Up to `count` distinct commanders picked at random
#[must_use]
pub fn suggestions(engine: &SearchEngine, count: usize) -> Vec<Record> {
    engine
        .snapshot()
        .random_records(count)
        .into_iter()
        .cloned()
        .collect()
}

/// Execute the random command
///
/// # Errors
/// Returns `FetchrError::InvalidInput` when `count` is zero
pub fn execute(engine: &SearchEngine, count: usize, quiet: bool) -> Result<()> {
    if count == 0 {
        return Err(FetchrError::InvalidInput("Count must be at least 1".into()));
    }

    let records = suggestions(engine, count);
    if records.is_empty() {
        if !quiet {
            println!("No commanders loaded.");
        }
        return Ok(());
    }
    for line in output::record_lines(&records, quiet) {
        println!("{line}");
    }
    Ok(())
}
