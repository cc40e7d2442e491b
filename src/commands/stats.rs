//! Stats command - dataset summary

use crate::{FetchrError, output, search::SearchEngine};
use colored::Colorize;

type Result<T> = std::result::Result<T, FetchrError>;

/// Execute the stats command
///
/// Also reports fixed partners that name a commander missing from the
/// dataset.
pub fn execute(engine: &SearchEngine, quiet: bool) -> Result<()> {
    let snapshot = engine.snapshot();
    let stats = snapshot.stats();

    if quiet {
        println!("{}", stats.total);
        return Ok(());
    }

    for line in output::stats_lines(&stats) {
        println!("{line}");
    }

    let unresolved = snapshot.unresolved_fixed_partners();
    if !unresolved.is_empty() {
        println!("{}", "Partners missing from the dataset:".yellow());
        for (name, partner) in unresolved {
            println!("  {name} -> {partner}");
        }
    }
    Ok(())
}
