//! Course grouping and schedule statistics

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{ClassEntry, ColorIndex, EntryId};
use crate::time_grid::{TimeLabel, Weekday};

/// One meeting of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub day: Weekday,
    pub start_time: TimeLabel,
    pub end_time: TimeLabel,
}

/// All entries sharing a course name
///
/// Room, credit and color come from the first entry of the course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseGroup {
    pub name: String,
    pub room: Option<String>,
    pub credit: u32,
    pub color: ColorIndex,
    pub occurrences: Vec<Occurrence>,
    pub member_ids: Vec<EntryId>,
}

/// Group entries by name, in order of each name's first appearance
pub fn group_by_name(entries: &[ClassEntry]) -> Vec<CourseGroup> {
    let mut groups: Vec<CourseGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let slot = *index.entry(entry.name.as_str()).or_insert_with(|| {
            groups.push(CourseGroup {
                name: entry.name.clone(),
                room: entry.room.clone(),
                credit: entry.credit,
                color: entry.color,
                occurrences: Vec::new(),
                member_ids: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.occurrences.push(Occurrence {
            day: entry.day,
            start_time: entry.start_time,
            end_time: entry.end_time,
        });
        group.member_ids.push(entry.id);
    }

    groups
}

/// Aggregate statistics for the summary panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of distinct course names
    pub distinct_courses: usize,
    /// Credits summed over every entry; a course meeting twice counts twice
    pub total_credits: u32,
    /// Credits summed once per course
    pub course_credits: u32,
    /// Minutes of class per week
    pub total_weekly_minutes: u32,
}

impl Summary {
    /// Weekly class time in hours, rounded half up
    pub fn weekly_hours(&self) -> u32 {
        (self.total_weekly_minutes + 30) / 60
    }
}

/// Compute summary statistics
pub fn summarize(entries: &[ClassEntry]) -> Summary {
    let groups = group_by_name(entries);

    Summary {
        distinct_courses: groups.len(),
        total_credits: entries.iter().map(|e| e.credit).sum(),
        course_credits: groups.iter().map(|g| g.credit).sum(),
        total_weekly_minutes: entries.iter().map(ClassEntry::duration_minutes).sum(),
    }
}
