//! Application state management

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use timetable_core::{
    Database, Error, Result, Schedule, ScheduleEditor, TimeGrid, TimetableConfig,
};

/// Database file name inside the data directory
const DATABASE_FILE_NAME: &str = "timetable.db";

/// Main application state
pub struct AppState {
    pub config: TimetableConfig,
    pub editor: ScheduleEditor<Database>,
    data_dir: PathBuf,
}

impl AppState {
    /// Load configuration and the saved schedule from the platform directories
    pub fn new() -> Result<Self> {
        let config_path = TimetableConfig::default_path()?;
        let config = TimetableConfig::load_or_default(&config_path)?;
        Self::with_config(config, Self::data_path()?)
    }

    /// Build state from explicit settings
    pub fn with_config(config: TimetableConfig, data_dir: PathBuf) -> Result<Self> {
        let db_path = config
            .storage
            .database
            .clone()
            .unwrap_or_else(|| data_dir.join(DATABASE_FILE_NAME));

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&db_path)?;
        let schedule = Schedule::open(db, &config.storage);
        let editor = ScheduleEditor::new(schedule, TimeGrid::standard());

        Ok(Self {
            config,
            editor,
            data_dir,
        })
    }

    fn data_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "onyx", "timetable").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// When the schedule was last written
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        let schedule = self.editor.schedule();
        schedule
            .store()
            .kv()
            .updated_at(schedule.key())
            .ok()
            .flatten()
    }
}
