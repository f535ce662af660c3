//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashMap;

use crate::models::{ClassEntry, ColorIndex};
use crate::time_grid::TimeGrid;

/// Validate that an entry is internally consistent and sits on the grid
pub fn assert_entry_invariants(entry: &ClassEntry, grid: &TimeGrid) {
    debug_assert!(
        !entry.name.trim().is_empty(),
        "Entry {} has empty name",
        entry.id
    );

    debug_assert!(
        entry.start_time < entry.end_time,
        "Entry {} ends at {} before it starts at {}",
        entry.id,
        entry.end_time,
        entry.start_time
    );

    debug_assert!(
        grid.contains(entry.start_time) && grid.contains(entry.end_time),
        "Entry {} uses off-grid times {}~{}",
        entry.id,
        entry.start_time,
        entry.end_time
    );
}

/// Validate that entries sharing a name share a color
pub fn assert_color_consistency(entries: &[ClassEntry]) {
    let mut colors: HashMap<&str, ColorIndex> = HashMap::new();
    for entry in entries {
        let first = *colors.entry(entry.name.as_str()).or_insert(entry.color);
        debug_assert!(
            first == entry.color,
            "Course {:?} has colors {} and {}",
            entry.name,
            first.get(),
            entry.color.get()
        );
    }
}

/// Validate that no two entries share an id
pub fn assert_unique_ids(entries: &[ClassEntry]) {
    for (i, entry) in entries.iter().enumerate() {
        debug_assert!(
            !entries[i + 1..].iter().any(|other| other.id == entry.id),
            "Duplicate entry id {}",
            entry.id
        );
    }
}
