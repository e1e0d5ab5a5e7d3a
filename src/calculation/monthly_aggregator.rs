//! Monthly deduction/credit fold.
//!
//! This module folds an employee's day classifications into a [`MonthlySummary`]:
//!
//! - `leave_taken_total` = absences + charged leave
//! - `extra_working_days_total` = extra-work bonus units
//! - `half_day_worked_total` = half days worked × 0.5
//! - `net_deduction` = `(extra + allowance) - (leave_taken + half_day_worked)`
//! - `payable_salary_days` = `net_deduction + baseline`
//!
//! The baseline is the policy's fixed nominal month (30 days by default), not the
//! number of calendar days in the month.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::config::AttendancePolicy;
use crate::models::{DayCategory, DayClassification, Employee, MonthlySummary};

/// Running totals for one employee's month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Tally {
    leave_taken: Decimal,
    extra_working_days: Decimal,
    half_day_worked: Decimal,
    absent_days: u32,
    leave_days: u32,
    half_days_worked: u32,
    extra_work_days: u32,
}

impl Tally {
    fn record(mut self, cell: &DayClassification) -> Self {
        match cell.category {
            DayCategory::AbsenceCharged => {
                self.leave_taken += cell.units;
                self.absent_days += 1;
            }
            DayCategory::LeaveCharged => {
                self.leave_taken += cell.units;
                self.leave_days += 1;
            }
            DayCategory::HalfDayWorked => {
                self.half_day_worked += cell.units;
                self.half_days_worked += 1;
            }
            DayCategory::ExtraWorkBonus => {
                self.extra_working_days += cell.units;
                self.extra_work_days += 1;
            }
            DayCategory::Normal => {}
        }
        self
    }
}

/// Folds one employee's cells into their monthly summary.
///
/// Cells belonging to other employees are skipped, so the whole grid may be passed.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::summarize_employee;
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::models::{DayCategory, DayClassification, DayKind, Employee};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     first_name: "Asha".to_string(),
///     last_name: "Rao".to_string(),
/// };
/// let absence = DayClassification {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
///     day_kind: DayKind::Ordinary,
///     category: DayCategory::AbsenceCharged,
///     units: Decimal::ONE,
///     worked_hours: None,
///     reason: String::new(),
/// };
///
/// let summary = summarize_employee(&employee, &[absence], &AttendancePolicy::default());
/// // (0 + 1) - (1 + 0) = 0, and 0 + 30 = 30
/// assert_eq!(summary.net_deduction, Decimal::ZERO);
/// assert_eq!(summary.payable_salary_days, Decimal::from(30));
/// ```
pub fn summarize_employee(
    employee: &Employee,
    cells: &[DayClassification],
    policy: &AttendancePolicy,
) -> MonthlySummary {
    let tally = cells
        .iter()
        .filter(|c| c.employee_id == employee.id)
        .fold(Tally::default(), Tally::record);

    build_summary(employee, tally, policy)
}

fn build_summary(employee: &Employee, tally: Tally, policy: &AttendancePolicy) -> MonthlySummary {
    let paid_leave_allowance = policy.paid_leave_allowance;
    let net_deduction = (tally.extra_working_days + paid_leave_allowance)
        - (tally.leave_taken + tally.half_day_worked);

    MonthlySummary {
        employee_id: employee.id.clone(),
        employee_name: employee.display_name(),
        leave_taken_total: tally.leave_taken,
        extra_working_days_total: tally.extra_working_days,
        half_day_worked_total: tally.half_day_worked,
        paid_leave_allowance,
        net_deduction,
        payable_salary_days: net_deduction + policy.salary_baseline_days,
        absent_days: tally.absent_days,
        leave_days: tally.leave_days,
        half_days_worked: tally.half_days_worked,
        extra_work_days: tally.extra_work_days,
    }
}

/// Folds the whole grid into one summary per employee, in the order given.
///
/// The grid is scanned once; employees without cells get an allowance-only summary.
pub fn aggregate_month(
    employees: &[&Employee],
    grid: &[DayClassification],
    policy: &AttendancePolicy,
) -> Vec<MonthlySummary> {
    let mut tallies: HashMap<&str, Tally> = HashMap::with_capacity(employees.len());
    for cell in grid {
        let tally = tallies.entry(cell.employee_id.as_str()).or_default();
        *tally = tally.record(cell);
    }

    employees
        .iter()
        .map(|employee| {
            let tally = tallies.get(employee.id.as_str()).copied().unwrap_or_default();
            build_summary(employee, tally, policy)
        })
        .collect()
}
