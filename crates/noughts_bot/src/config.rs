//! Bot configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Environment variable naming the config file when none is given explicitly.
pub const CONFIG_ENV: &str = "NOUGHTS_CONFIG";

/// Configuration for the bot process.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot name shown in the welcome message.
    #[serde(default = "default_name")]
    name: String,

    /// Log filter used when `RUST_LOG` is unset (e.g., "info", "noughts_bot=debug").
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Capacity of the inbound action queue.
    #[serde(default = "default_channel_capacity")]
    channel_capacity: usize,
}

fn default_name() -> String {
    "noughts".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_channel_capacity() -> usize {
    64
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_filter: default_log_filter(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl BotConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.channel_capacity == 0 {
            return Err(ConfigError::new("channel_capacity must be at least 1"));
        }

        info!(name = %config.name, "Config loaded successfully");
        Ok(config)
    }

    /// Resolves the config source: an explicit path, then `NOUGHTS_CONFIG`,
    /// then built-in defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given; using defaults");
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
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(BotConfig::from_toml("").expect("valid"), BotConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = BotConfig::from_toml("name = \"tictac\"\nchannel_capacity = 8\n")
            .expect("valid");
        assert_eq!(config.name(), "tictac");
        assert_eq!(*config.channel_capacity(), 8);
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = BotConfig::from_toml("channel_capacity = 0").unwrap_err();
        assert!(err.message.contains("channel_capacity"));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = BotConfig::from_toml("name = ").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }
}
