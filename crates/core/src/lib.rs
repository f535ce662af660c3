//! Timetable Core Library
//!
//! Weekly class timetable engine: the time grid, the persisted schedule,
//! conflict checks, grid projection and course statistics.
//!
//! # Modules
//!
//! - **`time_grid`**: Slot boundaries (`09:00`..=`18:00`, every 30 minutes) and weekdays
//! - **`schedule`**: The owned entry list, mirrored to a key-value store
//! - **`validation`**: Time-order checks and half-open overlap detection
//! - **`projection`**: Day × slot grid for rendering
//! - **`summary`**: Grouping by course name and aggregate statistics
//! - **`editor`**: Runs a user action from validation to persistence
//! - **`storage`**: Key-value persistence (SQLite, in-memory)

pub mod config;
pub mod editor;
pub mod error;
pub mod invariants;
pub mod models;
pub mod projection;
pub mod schedule;
pub mod storage;
pub mod summary;
pub mod time_grid;
pub mod validation;

pub use config::{ConfigError, DisplayConfig, StorageConfig, TimetableConfig};
pub use editor::{AutoConfirm, Confirm, DeleteOutcome, EditDraft, ScheduleEditor, ScheduleView, SubmitOutcome};
pub use error::{Error, Result};
pub use models::*;
pub use projection::{project, CellLabel, Grid, GridCell};
pub use schedule::Schedule;
pub use storage::{Database, KeyValueStore, KeyValueTable, MemoryStore};
pub use summary::{group_by_name, summarize, CourseGroup, Occurrence, Summary};
pub use time_grid::{time_to_minutes, TimeGrid, TimeLabel, Weekday};
pub use validation::{find_conflicts, overlaps, validate, validate_on_grid, InvalidReason, ValidationOutcome};
