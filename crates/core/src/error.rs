//! Error types for Timetable Core

use thiserror::Error;

use crate::config::ConfigError;
use crate::time_grid::TimeLabel;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("End time {end} must be later than start time {start}")]
    TimeOrder { start: TimeLabel, end: TimeLabel },

    #[error("Overlaps with \"{with}\"")]
    Conflict { with: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid time label: {0}")]
    InvalidTime(String),

    #[error("Invalid day index: {0}")]
    InvalidDay(u8),

    #[error("Invalid color index: {0}")]
    InvalidColor(u8),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
