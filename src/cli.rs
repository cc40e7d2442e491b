//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for fetchr using the `clap` crate.
//!
//! # Commands
//!
//! - **pick**: Interactive commander selection with partner prompts (default)
//! - **prefix**: Names starting with the given letters
//! - **search**: Fuzzy name search
//! - **closest**: Nearest name by edit distance
//! - **partner**: Partner decision and options for a commander
//! - **list**: Commanders by color identity and/or mana value
//! - **random**: Random commander suggestions
//! - **stats**: Dataset statistics
//! - **fetch**: Download the dataset from the Scryfall card search
//! - **import**: Convert saved Scryfall search pages to the dataset format
//! - **config**: Show or change configuration
//!
//! Global `--quiet` prints bare names for scripting; `--data` points at a
//! dataset other than the configured one.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "fetchr")]
#[command(about = "Commander name search with partner resolution", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Dataset file to load (overrides config)
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Pick a commander interactively (default)
    #[command(visible_alias = "p")]
    Pick,

    /// List names starting with the given letters
    Prefix {
        /// Leading letters of the name
        letters: String,

        /// Only partner-eligible commanders
        #[arg(long = "partners")]
        partners: bool,
    },

    /// Fuzzy search by name
    #[command(visible_alias = "s")]
    Search {
        /// Text to search for
        #[arg(value_name = "QUERY", num_args = 1.., required = true)]
        query: Vec<String>,
    },

    /// Find the single closest name
    Closest {
        /// Possibly misspelled name
        #[arg(value_name = "QUERY", num_args = 1.., required = true)]
        query: Vec<String>,
    },

    /// Show the partner decision for a commander
    Partner {
        /// Exact commander name
        #[arg(value_name = "NAME", num_args = 1.., required = true)]
        name: Vec<String>,
    },

    /// List commanders by color identity and/or mana value
    #[command(visible_alias = "ls")]
    List {
        /// Color identity symbols, e.g. WUB (use "C" or "" for colorless)
        #[arg(short = 'c', long = "color", value_name = "WUBRG")]
        color: Option<String>,

        /// Mana value
        #[arg(short = 'm', long = "cmc", value_name = "N")]
        cmc: Option<u32>,
    },

    /// Suggest random commanders
    Random {
        /// Number of suggestions
        #[arg(short = 'n', long = "count", value_name = "N", default_value_t = 5)]
        count: usize,
    },

    /// Show dataset statistics
    Stats,

    /// Download every commander from the Scryfall card search
    Fetch {
        /// Where to write the dataset (defaults to the configured data file)
        #[arg(short = 'o', long = "out", value_name = "PATH")]
        out: Option<PathBuf>,

        /// Search URL to page through instead of the commander search
        #[arg(long = "url", value_name = "URL")]
        url: Option<String>,
    },

    /// Convert saved Scryfall search pages into a dataset file
    Import {
        /// Saved search result pages
        #[arg(value_name = "PAGE.json", num_args = 1.., required = true)]
        pages: Vec<PathBuf>,

        /// Where to write the dataset
        #[arg(short = 'o', long = "out", value_name = "PATH")]
        out: PathBuf,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. data_file, quiet)
        key: String,

        /// New value (empty clears a path)
        value: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Pick if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Pick)
    }
}

/// Join words of a multi-word positional argument
#[must_use]
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
