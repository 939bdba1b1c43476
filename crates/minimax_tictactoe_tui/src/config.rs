//! Front-end configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use minimax_tictactoe::Mark;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "minimax_tictactoe.toml";

/// Configuration for the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Mark the human plays ("X" or "O").
    #[serde(default = "default_human_mark")]
    human_mark: Mark,

    /// Show accumulated engine thinking time in the status bar.
    #[serde(default = "default_show_search_time")]
    show_search_time: bool,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_human_mark() -> Mark {
    Mark::X
}

fn default_show_search_time() -> bool {
    true
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            human_mark: default_human_mark(),
            show_search_time: default_show_search_time(),
            log_filter: default_log_filter(),
        }
    }
}

impl TuiConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(human_mark = %config.human_mark, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `explicit` if given, else [`DEFAULT_CONFIG_PATH`] if present,
    /// else defaults.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            "human_mark = \"O\"\nshow_search_time = false\nlog_filter = \"debug\"\n",
        );
        let config = TuiConfig::from_file(file.path()).unwrap();
        assert_eq!(config.human_mark(), &Mark::O);
        assert!(!config.show_search_time());
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let file = write_config("show_search_time = false\n");
        let config = TuiConfig::from_file(file.path()).unwrap();
        assert_eq!(config.human_mark(), &Mark::X);
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_invalid_mark_is_error() {
        let file = write_config("human_mark = \"Z\"\n");
        let err = TuiConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"), "{err}");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = TuiConfig::load(Some(&missing)).unwrap_err();
        assert!(err.message.contains("Failed to read config file"), "{err}");
    }
}
