//! Approved leave indexing.
//!
//! This module keeps the approved leave intervals per employee and answers
//! "is this employee on leave on this day, and is it a half day?".

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{AuditWarning, LeaveRecord};

/// The result of a per-day leave lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeaveLookup {
    /// Whether any approved leave covers the day.
    pub is_on_leave: bool,
    /// Whether the first matching leave is a half-day leave.
    pub is_half_day: bool,
    /// How many approved leave records cover the day (more than one is an anomaly).
    pub matching_records: usize,
}

impl LeaveLookup {
    /// Returns true if more than one approved record covers the day.
    pub fn is_overlapping(&self) -> bool {
        self.matching_records > 1
    }
}

/// Approved leave intervals grouped by employee.
///
/// Only approved records are kept; anything else never reaches the classifier.
/// Intervals are tested linearly on lookup.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::LeaveIndex;
/// use attendance_engine::models::{LeaveRecord, LeaveStatus};
/// use chrono::NaiveDate;
///
/// let date = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
/// let index = LeaveIndex::build(&[
///     LeaveRecord {
///         employee_id: "emp_001".to_string(),
///         from_date: date(10),
///         to_date: date(10),
///         is_half_day: true,
///         status: LeaveStatus::Approved,
///     },
///     LeaveRecord {
///         employee_id: "emp_001".to_string(),
///         from_date: date(20),
///         to_date: date(21),
///         is_half_day: false,
///         status: LeaveStatus::Pending,
///     },
/// ]);
///
/// let lookup = index.leave_for("emp_001", date(10));
/// assert!(lookup.is_on_leave && lookup.is_half_day);
/// assert!(!index.leave_for("emp_001", date(20)).is_on_leave);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeaveIndex {
    by_employee: HashMap<String, Vec<LeaveRecord>>,
    warnings: Vec<AuditWarning>,
}

impl LeaveIndex {
    /// Indexes the approved records, preserving their input order per employee.
    ///
    /// Approved records whose `to_date` precedes `from_date` are dropped with an
    /// `INVALID_LEAVE_RANGE` warning.
    pub fn build(records: &[LeaveRecord]) -> Self {
        let mut by_employee: HashMap<String, Vec<LeaveRecord>> = HashMap::new();
        let mut warnings = Vec::new();

        for record in records.iter().filter(|r| r.is_approved()) {
            if record.to_date < record.from_date {
                warn!(
                    employee_id = %record.employee_id,
                    from_date = %record.from_date,
                    to_date = %record.to_date,
                    "Leave ends before it starts, ignoring"
                );
                warnings.push(AuditWarning::new(
                    "INVALID_LEAVE_RANGE",
                    format!(
                        "Leave of {} from {} to {} ends before it starts; ignored",
                        record.employee_id, record.from_date, record.to_date
                    ),
                    "medium",
                ));
                continue;
            }

            by_employee
                .entry(record.employee_id.clone())
                .or_default()
                .push(record.clone());
        }

        Self {
            by_employee,
            warnings,
        }
    }

    /// Looks up the leave state of `employee_id` on `date`.
    ///
    /// When several approved records overlap the day, the first one in input
    /// order decides `is_half_day`.
    pub fn leave_for(&self, employee_id: &str, date: NaiveDate) -> LeaveLookup {
        let Some(records) = self.by_employee.get(employee_id) else {
            return LeaveLookup::default();
        };

        let mut matching = records.iter().filter(|r| r.covers(date));
        let Some(first) = matching.next() else {
            return LeaveLookup::default();
        };

        LeaveLookup {
            is_on_leave: true,
            is_half_day: first.is_half_day,
            matching_records: 1 + matching.count(),
        }
    }

    /// Number of approved records kept.
    pub fn len(&self) -> usize {
        self.by_employee.values().map(Vec::len).sum()
    }

    /// Returns true if no approved record was kept.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Anomalies found while indexing.
    pub fn warnings(&self) -> &[AuditWarning] {
        &self.warnings
    }
}
