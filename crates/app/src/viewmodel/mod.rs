//! View models for the timetable screen
//!
//! Turn the editor's grid, course groups and statistics into display-ready
//! rows and labels.

mod class_list;
mod summary;
mod timetable;

use class_list::{build_class_list, render_class_list, ClassListItem};
use summary::{build_summary, SummaryItem};
use timetable::{build_timetable, TimetableModel};
use timetable_core::{DisplayConfig, ScheduleView};

/// Everything shown on the timetable screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenModel {
    pub timetable: TimetableModel,
    pub class_list: Vec<ClassListItem>,
    pub summary: SummaryItem,
}

impl ScreenModel {
    pub fn build(view: &ScheduleView<'_>, display: &DisplayConfig) -> Self {
        Self {
            timetable: build_timetable(&view.grid, display),
            class_list: build_class_list(&view.groups, display),
            summary: build_summary(&view.summary),
        }
    }

    /// Whole screen as plain text
    pub fn render_text(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.timetable.render_text(),
            render_class_list(&self.class_list),
            self.summary.render_text()
        )
    }
}
