//! Class entry model - one scheduled occurrence of a course

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::time_grid::{TimeLabel, Weekday};

/// Number of distinct entry colors
pub const PALETTE_SIZE: u8 = 8;

/// Identifier of a class entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Palette slot (1..=8) shared by all entries of one course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ColorIndex(u8);

impl ColorIndex {
    /// Color handed to the next new course when `existing` entries are stored
    pub fn for_position(existing: usize) -> Self {
        let offset = existing % usize::from(PALETTE_SIZE);
        // offset < PALETTE_SIZE, so the cast cannot truncate
        Self(offset as u8 + 1)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ColorIndex {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if (1..=PALETTE_SIZE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidColor(value))
        }
    }
}

impl From<ColorIndex> for u8 {
    fn from(color: ColorIndex) -> Self {
        color.0
    }
}

/// A course meeting placed on the weekly grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub room: Option<String>,
    pub day: Weekday,
    pub start_time: TimeLabel,
    pub end_time: TimeLabel,
    pub color: ColorIndex,
    #[serde(default)]
    pub credit: u32,
}

impl ClassEntry {
    /// Create an entry from submitted form values
    pub fn from_form(form: ClassForm, color: ColorIndex) -> Self {
        Self {
            id: EntryId::new(),
            name: form.name,
            room: form.room,
            day: form.day,
            start_time: form.start_time,
            end_time: form.end_time,
            color,
            credit: form.credit,
        }
    }

    /// Length of the meeting in minutes
    pub fn duration_minutes(&self) -> u32 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }

    /// Whether the entry covers the slot starting at `slot` on `day`
    pub fn occupies(&self, day: Weekday, slot: TimeLabel) -> bool {
        self.day == day && self.start_time <= slot && slot < self.end_time
    }

    /// Half-open overlap on the same day
    pub fn overlaps(&self, day: Weekday, start: TimeLabel, end: TimeLabel) -> bool {
        self.day == day && !(self.end_time <= start || self.start_time >= end)
    }

    /// Prefilled form for editing this entry
    pub fn to_form(&self) -> ClassForm {
        ClassForm {
            name: self.name.clone(),
            room: self.room.clone(),
            credit: self.credit,
            day: self.day,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Values captured by the class form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassForm {
    pub name: String,
    pub room: Option<String>,
    pub credit: u32,
    pub day: Weekday,
    pub start_time: TimeLabel,
    pub end_time: TimeLabel,
}

impl ClassForm {
    /// Create a form; blank names and rooms are normalized by trimming
    pub fn new(name: impl Into<String>, day: Weekday, start_time: TimeLabel, end_time: TimeLabel) -> Self {
        Self {
            name: name.into().trim().to_string(),
            room: None,
            credit: 0,
            day,
            start_time,
            end_time,
        }
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        let room = room.into();
        let room = room.trim();
        self.room = (!room.is_empty()).then(|| room.to_string());
        self
    }

    pub fn with_credit(mut self, credit: u32) -> Self {
        self.credit = credit;
        self
    }

    /// Parse raw text fields as a form submits them
    pub fn parse(
        name: &str,
        room: &str,
        credit: &str,
        day: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<Self> {
        let credit = credit
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::InvalidInput(format!("credit must be a whole number, got {credit:?}")))?;
        let day = day
            .trim()
            .parse::<u8>()
            .map_err(|_| Error::InvalidInput(format!("day must be an index, got {day:?}")))?;

        Ok(Self::new(
            name,
            Weekday::try_from(day)?,
            start_time.trim().parse()?,
            end_time.trim().parse()?,
        )
        .with_room(room)
        .with_credit(credit))
    }
}
