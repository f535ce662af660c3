//! Course list view model

use timetable_core::{CourseGroup, DisplayConfig};

/// Shown instead of the list when nothing has been added
pub const EMPTY_LIST_MESSAGE: &str = "No classes yet. Add one with the form above.";

/// One course card in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassListItem {
    pub name: String,
    pub room: String,
    /// Meetings, e.g. `Mon 09:00~10:30, Wed 13:00~14:30`
    pub times: String,
    pub credits: String,
    #[allow(dead_code)]
    pub color_class: String,
    #[allow(dead_code)]
    pub member_ids: Vec<String>,
}

pub fn build_class_list(groups: &[CourseGroup], display: &DisplayConfig) -> Vec<ClassListItem> {
    groups
        .iter()
        .map(|group| ClassListItem {
            name: group.name.clone(),
            room: group
                .room
                .clone()
                .unwrap_or_else(|| display.empty_room_label.clone()),
            times: group
                .occurrences
                .iter()
                .map(|o| {
                    format!(
                        "{} {}~{}",
                        display.day_label(o.day),
                        o.start_time,
                        o.end_time
                    )
                })
                .collect::<Vec<_>>()
                .join(", "),
            credits: credit_label(group.credit),
            color_class: format!("color-{}", group.color.get()),
            member_ids: group.member_ids.iter().map(ToString::to_string).collect(),
        })
        .collect()
}

pub fn credit_label(credit: u32) -> String {
    match credit {
        1 => "1 credit".to_string(),
        n => format!("{n} credits"),
    }
}

/// Text block for the list, or the empty message
pub fn render_class_list(items: &[ClassListItem]) -> String {
    if items.is_empty() {
        return format!("{EMPTY_LIST_MESSAGE}\n");
    }

    items
        .iter()
        .map(|item| {
            format!(
                "{}\n  room: {}\n  time: {}\n  {}\n",
                item.name, item.room, item.times, item.credits
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetable_core::{group_by_name, ClassEntry, ClassForm, ColorIndex, Weekday};

    fn entry(name: &str, day: Weekday, start: &str, end: &str) -> ClassEntry {
        ClassEntry::from_form(
            ClassForm::new(name, day, start.parse().unwrap(), end.parse().unwrap()).with_credit(3),
            ColorIndex::for_position(0),
        )
    }

    #[test]
    fn test_build_class_list() {
        let entries = vec![
            entry("Algorithms", Weekday::Monday, "09:00", "10:30"),
            entry("Algorithms", Weekday::Wednesday, "13:00", "14:30"),
        ];
        let items = build_class_list(&group_by_name(&entries), &DisplayConfig::default());

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.room, "No room");
        assert_eq!(item.times, "Mon 09:00~10:30, Wed 13:00~14:30");
        assert_eq!(item.credits, "3 credits");
        assert_eq!(item.color_class, "color-1");
        assert_eq!(item.member_ids.len(), 2);
    }

    #[test]
    fn test_localized_labels() {
        let display = DisplayConfig {
            day_labels: ["월", "화", "수", "목", "금"].map(String::from).to_vec(),
            empty_room_label: "강의실 미지정".to_string(),
        };
        let entries = vec![entry("자료구조", Weekday::Friday, "15:00", "16:00")];
        let items = build_class_list(&group_by_name(&entries), &display);

        assert_eq!(items[0].times, "금 15:00~16:00");
        assert_eq!(items[0].room, "강의실 미지정");
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_class_list(&[]), format!("{EMPTY_LIST_MESSAGE}\n"));
    }

    #[test]
    fn test_credit_label() {
        assert_eq!(credit_label(0), "0 credits");
        assert_eq!(credit_label(1), "1 credit");
        assert_eq!(credit_label(4), "4 credits");
    }
}
