//! Weekly time grid
//!
//! The timetable is a fixed grid of five weekdays by half-hour slots.
//! Slot boundaries are `HH:MM` labels stored as minutes since midnight,
//! so ordering labels by value is the same as ordering the zero-padded
//! strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// First slot boundary of the standard grid (09:00)
pub const DAY_START_MINUTES: u16 = 9 * 60;
/// Closing boundary of the standard grid (18:00)
pub const DAY_END_MINUTES: u16 = 18 * 60;
/// Slot length in minutes
pub const SLOT_MINUTES: u16 = 30;

/// A slot boundary such as `09:30`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeLabel(u16);

impl TimeLabel {
    /// Build a label from hours and minutes
    pub fn from_hm(hours: u8, minutes: u8) -> Result<Self> {
        if hours > 23 || minutes > 59 {
            return Err(Error::InvalidTime(format!("{hours}:{minutes}")));
        }
        Ok(Self(u16::from(hours) * 60 + u16::from(minutes)))
    }

    fn from_minutes(minutes: u16) -> Self {
        Self(minutes)
    }

    /// Minutes since midnight
    #[inline]
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }
}

impl FromStr for TimeLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidTime(s.to_string());

        let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
        let is_two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !is_two_digits(hours) || !is_two_digits(minutes) {
            return Err(invalid());
        }

        let hours: u8 = hours.parse().map_err(|_| invalid())?;
        let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
        Self::from_hm(hours, minutes).map_err(|_| invalid())
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<String> for TimeLabel {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeLabel> for String {
    fn from(label: TimeLabel) -> Self {
        label.to_string()
    }
}

/// Convert an `HH:MM` label to minutes since midnight
pub fn time_to_minutes(label: &str) -> Result<u32> {
    label.parse::<TimeLabel>().map(TimeLabel::minutes)
}

/// Teaching days, serialized as their index (Monday = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
}

impl Weekday {
    /// All days in grid order
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
        }
    }
}

impl TryFrom<u8> for Weekday {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_index(usize::from(value)).ok_or(Error::InvalidDay(value))
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day as u8
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Days and slot boundaries of the timetable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    days: Vec<Weekday>,
    slots: Vec<TimeLabel>,
}

impl TimeGrid {
    /// The 09:00 to 18:00 half-hour grid (19 boundaries)
    pub fn standard() -> Self {
        let slots = (DAY_START_MINUTES..=DAY_END_MINUTES)
            .step_by(usize::from(SLOT_MINUTES))
            .map(TimeLabel::from_minutes)
            .collect();

        Self {
            days: Weekday::ALL.to_vec(),
            slots,
        }
    }

    /// Build a grid from `first` to `last` inclusive, every `step_minutes`
    pub fn new(first: TimeLabel, last: TimeLabel, step_minutes: u16) -> Result<Self> {
        if step_minutes == 0 || first > last {
            return Err(Error::InvalidInput(format!(
                "Invalid grid {first}..={last} every {step_minutes} minutes"
            )));
        }

        let slots = (first.0..=last.0)
            .step_by(usize::from(step_minutes))
            .map(TimeLabel::from_minutes)
            .collect();

        Ok(Self {
            days: Weekday::ALL.to_vec(),
            slots,
        })
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// Slot boundaries in ascending order
    pub fn slots(&self) -> &[TimeLabel] {
        &self.slots
    }

    /// Whether the label is one of the grid's boundaries
    pub fn contains(&self, label: TimeLabel) -> bool {
        self.slots.binary_search(&label).is_ok()
    }

    pub fn slot_index(&self, label: TimeLabel) -> Option<usize> {
        self.slots.binary_search(&label).ok()
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::standard()
    }
}
