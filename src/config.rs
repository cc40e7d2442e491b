//! Configuration module for fetchr
//!
//! Manages the dataset locations and search tuning. Configuration is stored
//! in the user's config directory and may be overridden with `FETCHR_*`
//! environment variables (`FETCHR_DATA_FILE`, `FETCHR_QUIET`, ...).

use crate::search::{DEFAULT_CACHE_CAPACITY, DEFAULT_FUZZY_MAX_DISTANCE, SearchSettings};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Candidate list size at which the picker shows the names
pub const DEFAULT_LIST_THRESHOLD: usize = 12;

/// Keys accepted by [`FetchrConfig::set`]
pub const CONFIG_KEYS: [&str; 6] = [
    "data_file",
    "names_file",
    "cache_capacity",
    "fuzzy_max_distance",
    "list_threshold",
    "quiet",
];

const fn default_cache_capacity() -> u64 {
    DEFAULT_CACHE_CAPACITY
}

const fn default_fuzzy_max_distance() -> usize {
    DEFAULT_FUZZY_MAX_DISTANCE
}

const fn default_list_threshold() -> usize {
    DEFAULT_LIST_THRESHOLD
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FetchrConfig {
    /// Record dataset (JSON array of card rows)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Fallback list of plain names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names_file: Option<PathBuf>,

    /// Maximum number of cached fuzzy queries
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,

    /// Edit distance accepted by fuzzy search
    #[serde(default = "default_fuzzy_max_distance")]
    pub fuzzy_max_distance: usize,

    /// Show the candidate names once this few remain
    #[serde(default = "default_list_threshold")]
    pub list_threshold: usize,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for FetchrConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            names_file: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            fuzzy_max_distance: DEFAULT_FUZZY_MAX_DISTANCE,
            list_threshold: DEFAULT_LIST_THRESHOLD,
            quiet: false,
        }
    }
}

impl FetchrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("fetchr").join("config.toml"))
    }

    /// Dataset location used when none is configured
    #[must_use]
    pub fn default_data_file() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("fetchr").join("commanders.json"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, overlaid by the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed, or an
    /// environment value has the wrong type.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading configuration");
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("FETCHR").try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Update one setting from its string form
    ///
    /// An empty value clears `data_file` or `names_file`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the key is unknown or the value does not
    /// parse for it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "data_file" => self.data_file = optional_path(value),
            "names_file" => self.names_file = optional_path(value),
            "cache_capacity" => self.cache_capacity = parse_value(key, value)?,
            "fuzzy_max_distance" => self.fuzzy_max_distance = parse_value(key, value)?,
            "list_threshold" => self.list_threshold = parse_value(key, value)?,
            "quiet" => self.quiet = parse_value(key, value)?,
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown configuration key: '{key}'. Available keys: {}",
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Search tuning taken from this configuration
    #[must_use]
    pub const fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            cache_capacity: self.cache_capacity,
            fuzzy_max_distance: self.fuzzy_max_distance,
        }
    }
}

impl fmt::Display for FetchrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(|| "(unset)".to_string(), |p| p.display().to_string())
        };
        writeln!(f, "data_file = {}", path(&self.data_file))?;
        writeln!(f, "names_file = {}", path(&self.names_file))?;
        writeln!(f, "cache_capacity = {}", self.cache_capacity)?;
        writeln!(f, "fuzzy_max_distance = {}", self.fuzzy_max_distance)?;
        writeln!(f, "list_threshold = {}", self.list_threshold)?;
        write!(f, "quiet = {}", self.quiet)
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    (!value.is_empty()).then(|| PathBuf::from(value))
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Message(format!("Invalid value for {key}: '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchrConfig::default();
        assert!(config.data_file.is_none());
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.fuzzy_max_distance, 2);
        assert_eq!(config.list_threshold, 12);
        assert!(!config.quiet);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FetchrConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.list_threshold, FetchrConfig::default().list_threshold);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_file = \"/srv/commanders.json\"\nfuzzy_max_distance = 3\n").unwrap();

        let config = FetchrConfig::load_from(&path).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/srv/commanders.json")));
        assert_eq!(config.fuzzy_max_distance, 3);
        assert_eq!(config.cache_capacity, 100);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = FetchrConfig::default();
        config.set("names_file", "/tmp/names.json").unwrap();
        config.set("quiet", "true").unwrap();
        config.save_to(&path).unwrap();

        assert_eq!(FetchrConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_set_values() {
        let mut config = FetchrConfig::default();
        config.set("cache_capacity", " 25 ").unwrap();
        config.set("list_threshold", "5").unwrap();
        config.set("data_file", "/tmp/data.json").unwrap();
        assert_eq!(config.cache_capacity, 25);
        assert_eq!(config.list_threshold, 5);

        config.set("data_file", "").unwrap();
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = FetchrConfig::default();
        assert!(config.set("quiet", "maybe").is_err());
        assert!(config.set("cache_capacity", "-1").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, FetchrConfig::default());
    }

    #[test]
    fn test_search_settings() {
        let mut config = FetchrConfig::default();
        config.fuzzy_max_distance = 4;
        let settings = config.search_settings();
        assert_eq!(settings.fuzzy_max_distance, 4);
        assert_eq!(settings.cache_capacity, 100);
    }

    #[test]
    fn test_display_lists_every_key() {
        let shown = FetchrConfig::default().to_string();
        for key in CONFIG_KEYS {
            assert!(shown.contains(key), "missing {key}");
        }
    }
}
