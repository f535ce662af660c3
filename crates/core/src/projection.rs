//! Grid projection
//!
//! Places entries onto the day × slot grid. A slot is occupied by an entry
//! when the entry's day matches and `start <= slot < end`. Only the first
//! slot of an entry carries its label, so consecutive cells render as one
//! block.
//!
//! If confirmed overlaps leave several entries covering the same slot, the
//! first entry in collection order wins the cell.

use crate::models::{ClassEntry, EntryId};
use crate::time_grid::{TimeGrid, TimeLabel, Weekday};

/// An occupied grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell<'a> {
    pub entry: &'a ClassEntry,
    /// The cell is the entry's starting slot
    pub is_first_slot: bool,
}

/// Text shown in the first cell of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLabel<'a> {
    pub name: &'a str,
    pub room: Option<&'a str>,
}

impl<'a> GridCell<'a> {
    /// Label data, present only on the first slot
    pub fn label(&self) -> Option<CellLabel<'a>> {
        self.is_first_slot.then(|| CellLabel {
            name: &self.entry.name,
            room: self.entry.room.as_deref(),
        })
    }
}

/// The projected timetable, indexed `[day][slot]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<'a> {
    days: Vec<Weekday>,
    slots: Vec<TimeLabel>,
    cells: Vec<Vec<Option<GridCell<'a>>>>,
}

impl<'a> Grid<'a> {
    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn slots(&self) -> &[TimeLabel] {
        &self.slots
    }

    /// Cell at a day and slot boundary
    pub fn cell(&self, day: Weekday, slot: TimeLabel) -> Option<&GridCell<'a>> {
        let d = self.days.iter().position(|&x| x == day)?;
        let s = self.slots.binary_search(&slot).ok()?;
        self.cell_at(d, s)
    }

    /// Cell by day and slot index
    pub fn cell_at(&self, day_index: usize, slot_index: usize) -> Option<&GridCell<'a>> {
        self.cells.get(day_index)?.get(slot_index)?.as_ref()
    }

    /// Slot rows in time order, one cell per day
    pub fn rows(&self) -> impl Iterator<Item = (TimeLabel, Vec<Option<&GridCell<'a>>>)> + '_ {
        self.slots.iter().enumerate().map(move |(s, &slot)| {
            let row = (0..self.days.len())
                .map(|d| self.cell_at(d, s))
                .collect();
            (slot, row)
        })
    }

    /// Number of cells an entry visibly occupies
    pub fn span_of(&self, id: EntryId) -> usize {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .filter(|cell| cell.entry.id == id)
            .count()
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().flatten().count()
    }
}

/// Project entries onto the grid
pub fn project<'a>(entries: &'a [ClassEntry], grid: &TimeGrid) -> Grid<'a> {
    let cells = grid
        .days()
        .iter()
        .map(|&day| {
            grid.slots()
                .iter()
                .map(|&slot| {
                    entries
                        .iter()
                        .find(|e| e.occupies(day, slot))
                        .map(|entry| GridCell {
                            entry,
                            is_first_slot: entry.start_time == slot,
                        })
                })
                .collect()
        })
        .collect();

    Grid {
        days: grid.days().to_vec(),
        slots: grid.slots().to_vec(),
        cells,
    }
}
