//! The month reconciliation pipeline.
//!
//! Builds the calendar, attendance and leave indices from an immutable snapshot of
//! the four inputs, classifies every (employee, day) cell of the month, then folds
//! the grid into monthly summaries. Nothing carries over between runs.

use std::collections::HashSet;
use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AttendancePolicy;
use crate::models::{
    AttendanceReport, AttendanceSheet, AuditWarning, CalendarSnapshot, Employee, LeaveRecord,
    MonthPeriod, Viewer,
};

use super::{AttendanceIndex, DayClassifier, LeaveIndex, OrgCalendar, aggregate_month};

/// The four month inputs, fully resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    /// The employees directory.
    pub employees: Vec<Employee>,
    /// Daily work-time reports.
    pub reports: Vec<AttendanceReport>,
    /// Leave records (any status; only approved ones are used).
    pub leaves: Vec<LeaveRecord>,
    /// Holiday and alternate-Saturday calendars.
    pub calendar: CalendarSnapshot,
}

/// Reconciles one month for the employees `viewer` may see.
///
/// The grid contains exactly one cell per visible employee per day of `period`,
/// ordered by employee (directory order) then date. An id listed more than once
/// in the directory is reconciled for its first entry only and raises a
/// `DUPLICATE_EMPLOYEE` warning.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{MonthSnapshot, reconcile_month};
/// use attendance_engine::config::AttendancePolicy;
/// use attendance_engine::models::{Employee, MonthPeriod, Viewer};
/// use chrono::NaiveDate;
///
/// let snapshot = MonthSnapshot {
///     employees: vec![Employee {
///         id: "emp_001".to_string(),
///         first_name: "Asha".to_string(),
///         last_name: "Rao".to_string(),
///     }],
///     ..MonthSnapshot::default()
/// };
/// let june = MonthPeriod::new(2024, 6).unwrap();
/// // Nothing has happened yet on the first of the month
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
///
/// let sheet = reconcile_month(&snapshot, june, &Viewer::admin("emp_001"), today, &AttendancePolicy::default());
/// assert_eq!(sheet.grid.len(), 30);
/// assert_eq!(sheet.summaries.len(), 1);
/// ```
pub fn reconcile_month(
    snapshot: &MonthSnapshot,
    period: MonthPeriod,
    viewer: &Viewer,
    today: NaiveDate,
    policy: &AttendancePolicy,
) -> AttendanceSheet {
    let start_time = Instant::now();

    let calendar = OrgCalendar::from_snapshot(&snapshot.calendar);
    let attendance = AttendanceIndex::build(&snapshot.reports, period);
    let leaves = LeaveIndex::build(&snapshot.leaves);
    let classifier = DayClassifier::new(&calendar, &attendance, &leaves, policy, today);

    let mut warnings = Vec::new();
    warnings.extend_from_slice(attendance.warnings());
    warnings.extend_from_slice(leaves.warnings());

    let employees = unique_employees(viewer.visible(&snapshot.employees), &mut warnings);

    let mut grid = Vec::with_capacity(employees.len() * period.day_count() as usize);
    for employee in &employees {
        for date in period.days() {
            let result = classifier.classify(&employee.id, date);
            grid.push(result.classification);
            warnings.extend(result.warning);
        }
    }

    let summaries = aggregate_month(&employees, &grid, policy);

    info!(
        period = %period,
        employees = employees.len(),
        cells = grid.len(),
        reports = attendance.len(),
        approved_leaves = leaves.len(),
        warnings = warnings.len(),
        duration_us = start_time.elapsed().as_micros() as u64,
        "Month reconciled"
    );

    AttendanceSheet {
        period,
        grid,
        summaries,
        warnings,
    }
}

/// Keeps the first directory entry for each employee id.
fn unique_employees<'a>(
    employees: Vec<&'a Employee>,
    warnings: &mut Vec<AuditWarning>,
) -> Vec<&'a Employee> {
    let mut seen: HashSet<&'a str> = HashSet::with_capacity(employees.len());
    let mut unique = Vec::with_capacity(employees.len());
    for employee in employees {
        if seen.insert(employee.id.as_str()) {
            unique.push(employee);
            continue;
        }
        warn!(employee_id = %employee.id, "Duplicate directory entry, keeping the first");
        warnings.push(AuditWarning::new(
            "DUPLICATE_EMPLOYEE",
            format!(
                "{} is listed more than once in the directory; the first entry was used",
                employee.id
            ),
            "medium",
        ));
    }
    unique
}
