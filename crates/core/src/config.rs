//! Timetable configuration
//!
//! Loaded from `timetable.toml` in the platform config directory. Every
//! field has a default, so a missing file or a partial file is fine.
//!
//! ```toml
//! [storage]
//! key = "timetable-classes"
//! reset_on_startup = false
//!
//! [display]
//! day_labels = ["Mon", "Tue", "Wed", "Thu", "Fri"]
//! empty_room_label = "No room"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::time_grid::Weekday;

/// Default persistence key for the schedule
pub const DEFAULT_STORAGE_KEY: &str = "timetable-classes";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "timetable.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Expected {expected} day labels, found {found}")]
    DayLabelCount { expected: usize, found: usize },
    #[error("Storage key must not be empty")]
    EmptyStorageKey,
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

/// Persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the schedule is stored under
    pub key: String,
    /// Database file; `None` uses the platform data directory
    pub database: Option<PathBuf>,
    /// Clear the stored schedule before loading (ephemeral demo mode)
    pub reset_on_startup: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            database: None,
            reset_on_startup: false,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// One label per weekday, Monday first
    pub day_labels: Vec<String>,
    /// Shown when an entry has no room
    pub empty_room_label: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            day_labels: Weekday::ALL
                .iter()
                .map(|d| d.short_name().to_string())
                .collect(),
            empty_room_label: "No room".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Label for a day, falling back to the built-in short name
    pub fn day_label(&self, day: Weekday) -> &str {
        self.day_labels
            .get(day.index())
            .map(String::as_str)
            .unwrap_or_else(|| day.short_name())
    }
}

impl TimetableConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from a file, using defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let config = Self::load_from_path(path)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// `timetable.toml` inside the platform config directory
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs =
            ProjectDirs::from("dev", "onyx", "timetable").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if self.display.day_labels.len() != Weekday::ALL.len() {
            return Err(ConfigError::DayLabelCount {
                expected: Weekday::ALL.len(),
                found: self.display.day_labels.len(),
            });
        }
        Ok(())
    }
}
