//! Summary panel view model

use timetable_core::Summary;

use super::class_list::credit_label;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub total_credits: String,
    pub total_courses: String,
    pub weekly_hours: String,
}

pub fn build_summary(summary: &Summary) -> SummaryItem {
    let courses = match summary.distinct_courses {
        1 => "1 course".to_string(),
        n => format!("{n} courses"),
    };

    SummaryItem {
        total_credits: credit_label(summary.total_credits),
        total_courses: courses,
        weekly_hours: format!("{} h/week", summary.weekly_hours()),
    }
}

impl SummaryItem {
    pub fn render_text(&self) -> String {
        format!(
            "{} | {} | {}\n",
            self.total_credits, self.total_courses, self.weekly_hours
        )
    }
}
