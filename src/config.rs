//! Loader configuration
//!
//! Settings are read from a TOML file. Every key is optional:
//!
//! ```toml
//! root = "./tiles"
//! default_mode = "external-raster"
//! log_file = "tileindex.log"
//! summary_file = "tileindex-summary.log"
//! ```

use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::index::errors::{IndexError, IndexResult};
use crate::index::mode::IndexMode;

pub const DEFAULT_LOG_FILE: &str = "tileindex.log";
pub const DEFAULT_SUMMARY_FILE: &str = "tileindex-summary.log";

/// Settings for loading index maps from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Directory tile locators are resolved against
    pub root: PathBuf,
    /// Mode used when the caller asks for `default`
    pub default_mode: IndexMode,
    /// Diagnostics written through the `log` crate
    pub log_file: String,
    /// One line per loaded tile
    pub summary_file: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            root: PathBuf::from("."),
            default_mode: IndexMode::None,
            log_file: DEFAULT_LOG_FILE.to_string(),
            summary_file: DEFAULT_SUMMARY_FILE.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> IndexResult<Self> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| IndexError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let mut config = LoaderConfig::default();

        if let Some(root) = Self::get_string(&table, "root")? {
            config.root = PathBuf::from(root);
        }
        if let Some(mode) = Self::get_string(&table, "default_mode")? {
            config.default_mode = mode
                .parse()
                .map_err(|_| IndexError::ConfigError(format!("Invalid default_mode: {}", mode)))?;
        }
        if let Some(log_file) = Self::get_string(&table, "log_file")? {
            config.log_file = log_file.to_string();
        }
        if let Some(summary_file) = Self::get_string(&table, "summary_file")? {
            config.summary_file = summary_file.to_string();
        }

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> IndexResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Reads an optional string key, rejecting other value types
    fn get_string<'v>(table: &'v toml::Table, key: &str) -> IndexResult<Option<&'v str>> {
        match table.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| IndexError::ConfigError(format!("{} must be a string", key))),
        }
    }
}
