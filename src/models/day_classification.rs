//! Per-cell classification models.
//!
//! A [`DayClassification`] is one cell of the month grid: the single category an
//! employee's day falls into, how much it contributes to that category's bucket,
//! and why.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DayKind;

/// The category assigned to an employee-day.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DayCategory;
///
/// let category = DayCategory::ExtraWorkBonus;
/// assert_eq!(serde_json::to_string(&category).unwrap(), "\"extra_work_bonus\"");
/// assert!(DayCategory::AbsenceCharged.is_charge());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCategory {
    /// Worked on a special/off day; credits 0.5 or 1.0 extra working day.
    ExtraWorkBonus,
    /// On approved leave on an Ordinary day; charges 0.5 or 1.0.
    LeaveCharged,
    /// Missing report in the past, or too few hours worked; charges 1.0.
    AbsenceCharged,
    /// Worked at least the half-day threshold but less than a full day; 0.5.
    HalfDayWorked,
    /// No charge and no bonus.
    Normal,
}

impl DayCategory {
    /// Returns true for the categories that count towards leave taken.
    pub fn is_charge(&self) -> bool {
        matches!(self, DayCategory::LeaveCharged | DayCategory::AbsenceCharged)
    }
}

impl std::fmt::Display for DayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayCategory::ExtraWorkBonus => write!(f, "Extra work"),
            DayCategory::LeaveCharged => write!(f, "Leave"),
            DayCategory::AbsenceCharged => write!(f, "Absent"),
            DayCategory::HalfDayWorked => write!(f, "Half day"),
            DayCategory::Normal => write!(f, "Normal"),
        }
    }
}

/// One employee-day cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    /// The employee.
    pub employee_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// What the calendar says about the day.
    pub day_kind: DayKind,
    /// The single category the cell falls into.
    pub category: DayCategory,
    /// Amount contributed to the category's bucket (0, 0.5 or 1.0).
    pub units: Decimal,
    /// Decimal hours from the filed report, `None` when no report was filed.
    pub worked_hours: Option<Decimal>,
    /// Explanation of the rule that produced the category.
    pub reason: String,
}

impl DayClassification {
    /// Hours for the grid, rounded to two decimals, or `"-"` without a report.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{DayCategory, DayClassification, DayKind};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let cell = DayClassification {
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    ///     day_kind: DayKind::Ordinary,
    ///     category: DayCategory::Normal,
    ///     units: Decimal::ZERO,
    ///     worked_hours: Some(Decimal::from_str("8.50").unwrap()),
    ///     reason: "full day".to_string(),
    /// };
    /// assert_eq!(cell.display_hours(), "8.5");
    /// ```
    pub fn display_hours(&self) -> String {
        match self.worked_hours {
            Some(hours) => hours.round_dp(2).normalize().to_string(),
            None => "-".to_string(),
        }
    }
}
