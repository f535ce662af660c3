//! Timetable grid view model

use timetable_core::{DisplayConfig, Grid};

/// Width of a day column in the text rendering
const COLUMN_WIDTH: usize = 14;
/// Width of the time column in the text rendering
const TIME_WIDTH: usize = 6;

/// One cell of the timetable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotItem {
    /// Entry to open for editing when the cell is clicked
    pub entry_id: Option<String>,
    /// Style class, e.g. `color-3`
    #[allow(dead_code)]
    pub color_class: String,
    /// Course name, only on the entry's first slot
    pub name: String,
    /// Room, only on the entry's first slot
    #[allow(dead_code)]
    pub room: String,
}

impl SlotItem {
    pub fn is_occupied(&self) -> bool {
        self.entry_id.is_some()
    }
}

/// One half-hour row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub time: String,
    pub cells: Vec<SlotItem>,
}

/// The whole grid, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableModel {
    pub headers: Vec<String>,
    pub rows: Vec<SlotRow>,
}

pub fn build_timetable(grid: &Grid<'_>, display: &DisplayConfig) -> TimetableModel {
    let headers = grid
        .days()
        .iter()
        .map(|&day| display.day_label(day).to_string())
        .collect();

    let rows = grid
        .rows()
        .map(|(slot, cells)| SlotRow {
            time: slot.to_string(),
            cells: cells
                .into_iter()
                .map(|cell| match cell {
                    None => SlotItem::default(),
                    Some(cell) => {
                        let label = cell.label();
                        SlotItem {
                            entry_id: Some(cell.entry.id.to_string()),
                            color_class: format!("color-{}", cell.entry.color.get()),
                            name: label.map(|l| l.name.to_string()).unwrap_or_default(),
                            room: label
                                .and_then(|l| l.room)
                                .unwrap_or_default()
                                .to_string(),
                        }
                    }
                })
                .collect(),
        })
        .collect();

    TimetableModel { headers, rows }
}

impl TimetableModel {
    /// Plain-text rendering; continuation slots are drawn as `|`
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&pad("", TIME_WIDTH));
        for header in &self.headers {
            out.push_str(&pad(header, COLUMN_WIDTH));
        }
        out.push('\n');

        for row in &self.rows {
            out.push_str(&pad(&row.time, TIME_WIDTH));
            for cell in &row.cells {
                let text = match (cell.is_occupied(), cell.name.is_empty()) {
                    (false, _) => "",
                    (true, true) => "|",
                    (true, false) => cell.name.as_str(),
                };
                out.push_str(&pad(text, COLUMN_WIDTH));
            }
            out.truncate(out.trim_end_matches(' ').len());
            out.push('\n');
        }

        out
    }
}

/// Left-align `text` in `width` characters, truncating with room for a gap
fn pad(text: &str, width: usize) -> String {
    let shown: String = text.chars().take(width.saturating_sub(1)).collect();
    let fill = width.saturating_sub(shown.chars().count());
    format!("{shown}{}", " ".repeat(fill))
}
