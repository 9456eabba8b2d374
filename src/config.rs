//! Configuration module for vfstore.

use serde::Deserialize;
use std::path::Path;

use crate::datetime::{is_valid_datetime_format, is_valid_timezone, DEFAULT_DATETIME_FORMAT};
use crate::{Result, VfsError};

/// How the folder store picks the id of a new folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderIdStrategy {
    /// Reuse the largest live id (base id while the store is empty).
    ///
    /// Compatibility mode: a second folder replaces the one holding that id.
    LastLive,
    /// Strictly increasing counter; ids are never handed out twice.
    Monotonic,
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Id handed to the first folder.
    #[serde(default = "default_folder_id_base")]
    pub folder_id_base: i64,
    /// Folder id assignment strategy.
    #[serde(default = "default_folder_id_strategy")]
    pub folder_id_strategy: FolderIdStrategy,
}

fn default_folder_id_base() -> i64 {
    1001
}

fn default_folder_id_strategy() -> FolderIdStrategy {
    FolderIdStrategy::Monotonic
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            folder_id_base: default_folder_id_base(),
            folder_id_strategy: default_folder_id_strategy(),
        }
    }
}

/// Output rendering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Timezone for listing timestamps (e.g., "UTC", "Asia/Taipei").
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// chrono format string for listing timestamps.
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
    /// Prompt written before each interactive read.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_datetime_format() -> String {
    DEFAULT_DATETIME_FORMAT.to_string()
}

fn default_prompt() -> String {
    "> ".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            datetime_format: default_datetime_format(),
            prompt: default_prompt(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file; empty logs to stderr.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Record store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Output rendering configuration.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(VfsError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| VfsError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `VFS_LOG_LEVEL`: Override the log level
    /// - `VFS_TIMEZONE`: Override the display timezone
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("VFS_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
        if let Ok(timezone) = std::env::var("VFS_TIMEZONE") {
            if !timezone.is_empty() {
                self.display.timezone = timezone;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The display timezone is not a known zone name
    /// - The datetime format is empty or not a valid strftime string
    pub fn validate(&self) -> Result<()> {
        if !is_valid_timezone(&self.display.timezone) {
            return Err(VfsError::Config(format!(
                "unknown timezone: {}",
                self.display.timezone
            )));
        }
        if self.display.datetime_format.is_empty() {
            return Err(VfsError::Config(
                "datetime_format must not be empty".to_string(),
            ));
        }
        if !is_valid_datetime_format(&self.display.datetime_format) {
            return Err(VfsError::Config(format!(
                "invalid datetime_format: {}",
                self.display.datetime_format
            )));
        }
        Ok(())
    }
}
