//! Reconciliation result models.
//!
//! This module contains the [`AttendanceSheet`] produced by one reconciliation pass
//! and its associated structures: the per-employee [`MonthlySummary`] rows and the
//! [`AuditWarning`]s raised for data anomalies.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DayClassification, MonthPeriod};

/// A warning generated during reconciliation.
///
/// Warnings flag data anomalies that were resolved deterministically but may
/// require attention (malformed durations, overlapping leaves, and so on).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium" or "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// Monthly deduction/credit figures for one employee.
///
/// All values are exact sums of half-day units; use [`MonthlySummary::rounded`]
/// only when presenting them.
///
/// # Example
///
/// ```
/// use attendance_engine::models::MonthlySummary;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let summary = MonthlySummary {
///     employee_id: "emp_001".to_string(),
///     employee_name: "Asha Rao".to_string(),
///     leave_taken_total: dec("1.5"),
///     extra_working_days_total: dec("1.0"),
///     half_day_worked_total: Decimal::ZERO,
///     paid_leave_allowance: Decimal::ONE,
///     net_deduction: dec("0.5"),
///     payable_salary_days: dec("30.5"),
///     absent_days: 1,
///     leave_days: 1,
///     half_days_worked: 0,
///     extra_work_days: 1,
/// };
/// assert_eq!(summary.payable_salary_days - summary.net_deduction, dec("30"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The employee.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// Absences plus charged leave, in days.
    pub leave_taken_total: Decimal,
    /// Extra working days credited for work on special/off days.
    pub extra_working_days_total: Decimal,
    /// Half days worked (0.5 each).
    pub half_day_worked_total: Decimal,
    /// Monthly paid leave allowance.
    pub paid_leave_allowance: Decimal,
    /// `(extra + allowance) - (leave_taken + half_day_worked)`.
    pub net_deduction: Decimal,
    /// `net_deduction + salary baseline`.
    pub payable_salary_days: Decimal,
    /// Number of days charged as absences.
    pub absent_days: u32,
    /// Number of days charged as leave.
    pub leave_days: u32,
    /// Number of half days worked.
    pub half_days_worked: u32,
    /// Number of special/off days worked.
    pub extra_work_days: u32,
}

impl MonthlySummary {
    /// Returns a copy with every figure rounded to one decimal for presentation.
    pub fn rounded(&self) -> Self {
        Self {
            leave_taken_total: self.leave_taken_total.round_dp(1),
            extra_working_days_total: self.extra_working_days_total.round_dp(1),
            half_day_worked_total: self.half_day_worked_total.round_dp(1),
            paid_leave_allowance: self.paid_leave_allowance.round_dp(1),
            net_deduction: self.net_deduction.round_dp(1),
            payable_salary_days: self.payable_salary_days.round_dp(1),
            ..self.clone()
        }
    }
}

/// The complete result of reconciling one month.
///
/// The grid holds one [`DayClassification`] per visible employee per day of the
/// month, ordered by employee then date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSheet {
    /// The reconciled month.
    pub period: MonthPeriod,
    /// Every employee-day cell.
    pub grid: Vec<DayClassification>,
    /// One summary row per visible employee.
    pub summaries: Vec<MonthlySummary>,
    /// Data anomalies encountered while reconciling.
    pub warnings: Vec<AuditWarning>,
}

impl AttendanceSheet {
    /// Returns the summary row for `employee_id`, if the employee was reconciled.
    pub fn summary_for(&self, employee_id: &str) -> Option<&MonthlySummary> {
        self.summaries.iter().find(|s| s.employee_id == employee_id)
    }

    /// Returns one employee's cells in date order.
    pub fn row<'a>(&'a self, employee_id: &'a str) -> impl Iterator<Item = &'a DayClassification> {
        self.grid.iter().filter(move |c| c.employee_id == employee_id)
    }

    /// Returns the cell for `employee_id` on `date`.
    pub fn cell(&self, employee_id: &str, date: NaiveDate) -> Option<&DayClassification> {
        self.grid
            .iter()
            .find(|c| c.employee_id == employee_id && c.date == date)
    }

    /// Returns true if any warning carries `code`.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}
