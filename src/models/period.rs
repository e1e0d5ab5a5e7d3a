//! The monthly reconciliation window.
//!
//! This module contains [`MonthPeriod`], the (year, month) selection that scopes
//! every fetch and every reconciliation pass.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month selected for reconciliation.
///
/// The period is validated on construction, so its first and last day are
/// always available.
///
/// # Example
///
/// ```
/// use attendance_engine::models::MonthPeriod;
/// use chrono::NaiveDate;
///
/// let june = MonthPeriod::new(2024, 6).unwrap();
/// assert_eq!(june.first_day(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
/// assert_eq!(june.last_day(), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
/// assert_eq!(june.days().count(), 30);
/// assert!(MonthPeriod::new(2024, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodSelection")]
pub struct MonthPeriod {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

/// The raw (year, month) pair a period is deserialized from.
#[derive(Debug, Clone, Copy, Deserialize)]
struct PeriodSelection {
    year: i32,
    month: u32,
}

impl TryFrom<PeriodSelection> for MonthPeriod {
    type Error = EngineError;

    fn try_from(raw: PeriodSelection) -> Result<Self, Self::Error> {
        MonthPeriod::new(raw.year, raw.month)
    }
}

impl MonthPeriod {
    /// Creates the period for `year`/`month`, rejecting months outside 1..=12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidPeriod { year, month };

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month_start = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let last_day = next_month_start
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    /// Returns the period containing `date`.
    pub fn containing(date: NaiveDate) -> EngineResult<Self> {
        Self::new(date.year(), date.month())
    }

    /// The selected year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The selected month (1..=12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Checks if `date` falls within the month (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day
    }

    /// Checks if the closed interval `[from, to]` shares at least one day with the month.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        from <= self.last_day && to >= self.first_day
    }

    /// Every day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first_day
            .iter_days()
            .take_while(move |d| *d <= self.last_day)
    }

    /// Number of calendar days in the month.
    pub fn day_count(&self) -> u32 {
        self.last_day.day()
    }
}

impl std::fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
