//! Data models for the timetable

mod entry;

pub use entry::*;
