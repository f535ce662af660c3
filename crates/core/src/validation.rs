//! Conflict and validation checks for submitted classes
//!
//! A candidate is checked in two stages:
//! - hard checks (empty name, end not after start, off-grid times) that
//!   block the submission outright
//! - overlap against existing entries on the same day, which only warns;
//!   the caller decides whether to proceed
//!
//! Overlap uses half-open intervals: `[09:00, 10:00)` and `[10:00, 11:00)`
//! do not conflict.

use crate::error::Error;
use crate::models::{ClassEntry, ClassForm};
use crate::time_grid::{TimeGrid, TimeLabel};

/// Why a candidate was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// End time is not after start time
    TimeOrder { start: TimeLabel, end: TimeLabel },
    /// Course name is blank
    EmptyName,
    /// A time is not one of the grid's slot boundaries
    SlotOutsideGrid(TimeLabel),
}

impl InvalidReason {
    /// User-facing message
    pub fn message(&self) -> String {
        match self {
            InvalidReason::TimeOrder { .. } => "End time must be later than start time".to_string(),
            InvalidReason::EmptyName => "Course name is required".to_string(),
            InvalidReason::SlotOutsideGrid(label) => format!("{label} is not on the timetable"),
        }
    }
}

impl From<InvalidReason> for Error {
    fn from(reason: InvalidReason) -> Self {
        match reason {
            InvalidReason::TimeOrder { start, end } => Error::TimeOrder { start, end },
            other => Error::InvalidInput(other.message()),
        }
    }
}

/// Result of validating a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok,
    /// Blocks the submission
    Invalid(InvalidReason),
    /// Overlaps an existing entry; needs confirmation
    Conflict { with: ClassEntry },
}

impl ValidationOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationOutcome::Ok)
    }
}

/// Whether `[a_start, a_end)` and `[b_start, b_end)` intersect
pub fn overlaps(a_start: TimeLabel, a_end: TimeLabel, b_start: TimeLabel, b_end: TimeLabel) -> bool {
    !(a_end <= b_start || a_start >= b_end)
}

/// Check time order, then overlap against `existing`
///
/// Only the first conflicting entry (in iteration order) is reported.
pub fn validate<'a, I>(candidate: &ClassForm, existing: I) -> ValidationOutcome
where
    I: IntoIterator<Item = &'a ClassEntry>,
{
    if candidate.start_time >= candidate.end_time {
        return ValidationOutcome::Invalid(InvalidReason::TimeOrder {
            start: candidate.start_time,
            end: candidate.end_time,
        });
    }

    match first_conflict(candidate, existing) {
        Some(entry) => ValidationOutcome::Conflict {
            with: entry.clone(),
        },
        None => ValidationOutcome::Ok,
    }
}

/// [`validate`] plus name and grid membership checks
pub fn validate_on_grid<'a, I>(candidate: &ClassForm, existing: I, grid: &TimeGrid) -> ValidationOutcome
where
    I: IntoIterator<Item = &'a ClassEntry>,
{
    if candidate.name.trim().is_empty() {
        return ValidationOutcome::Invalid(InvalidReason::EmptyName);
    }

    for label in [candidate.start_time, candidate.end_time] {
        if !grid.contains(label) {
            return ValidationOutcome::Invalid(InvalidReason::SlotOutsideGrid(label));
        }
    }

    validate(candidate, existing)
}

/// Every existing entry the candidate overlaps
pub fn find_conflicts<'a, I>(candidate: &ClassForm, existing: I) -> Vec<&'a ClassEntry>
where
    I: IntoIterator<Item = &'a ClassEntry>,
{
    existing
        .into_iter()
        .filter(|e| conflicts_with(candidate, e))
        .collect()
}

fn first_conflict<'a, I>(candidate: &ClassForm, existing: I) -> Option<&'a ClassEntry>
where
    I: IntoIterator<Item = &'a ClassEntry>,
{
    existing.into_iter().find(|e| conflicts_with(candidate, e))
}

fn conflicts_with(candidate: &ClassForm, entry: &ClassEntry) -> bool {
    entry.day == candidate.day
        && overlaps(
            entry.start_time,
            entry.end_time,
            candidate.start_time,
            candidate.end_time,
        )
}
