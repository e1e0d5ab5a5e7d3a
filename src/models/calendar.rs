//! Org-wide calendar models.
//!
//! This module contains the holiday and alternate-Saturday records fetched for a
//! month, and the [`DayKind`] label every date is classified into.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An organization-wide holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Founders Day").
    #[serde(default)]
    pub name: String,
}

/// An organization-designated Saturday that is treated as a day off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateSaturday {
    /// The Saturday.
    pub date: NaiveDate,
}

/// The result of the calendars fetch for one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSnapshot {
    /// Holidays in the month.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Alternate Saturdays in the month.
    #[serde(default)]
    pub alternate_saturdays: Vec<AlternateSaturday>,
}

/// The kind of day a date is, before any employee data is considered.
///
/// Every non-[`DayKind::Ordinary`] kind is a special/off day; they differ
/// only in the label shown on the grid.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DayKind;
///
/// assert!(DayKind::Holiday.is_off_day());
/// assert!(!DayKind::Ordinary.is_off_day());
/// assert_eq!(DayKind::AlternateSaturdayOff.to_string(), "Alternate Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// A regular working day.
    Ordinary,
    /// Sunday.
    WeeklyOff,
    /// A listed alternate Saturday.
    AlternateSaturdayOff,
    /// A listed holiday.
    Holiday,
}

impl DayKind {
    /// Returns true for every special/off day kind.
    pub fn is_off_day(&self) -> bool {
        !matches!(self, DayKind::Ordinary)
    }
}

impl std::fmt::Display for DayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayKind::Ordinary => write!(f, "Ordinary"),
            DayKind::WeeklyOff => write!(f, "Sunday"),
            DayKind::AlternateSaturdayOff => write!(f, "Alternate Saturday"),
            DayKind::Holiday => write!(f, "Holiday"),
        }
    }
}
