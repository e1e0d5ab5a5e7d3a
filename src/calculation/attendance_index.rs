//! Attendance report indexing.
//!
//! This module builds the `(date, employee) -> worked hours` lookup the day
//! classifier reads from. A missing entry means no report was filed, which is
//! different from a report of zero hours.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{AttendanceReport, AuditWarning, MonthPeriod};

use super::parse_worked_duration;

/// Worked hours per employee per day for one month.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::AttendanceIndex;
/// use attendance_engine::models::{AttendanceReport, MonthPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let june = MonthPeriod::new(2024, 6).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let index = AttendanceIndex::build(
///     &[AttendanceReport {
///         employee_id: "emp_001".to_string(),
///         date,
///         worked_duration: "08:30:00".to_string(),
///         report: String::new(),
///     }],
///     june,
/// );
///
/// assert_eq!(index.worked_hours(date, "emp_001"), Some(Decimal::from_str("8.5").unwrap()));
/// assert_eq!(index.worked_hours(date, "emp_002"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttendanceIndex {
    hours: HashMap<String, HashMap<NaiveDate, Decimal>>,
    warnings: Vec<AuditWarning>,
}

impl AttendanceIndex {
    /// Indexes the reports that fall inside `period`.
    ///
    /// Reports outside the month are ignored. A report whose duration cannot be
    /// parsed is treated as not filed and raises a `MALFORMED_DURATION` warning.
    /// When an employee has several reports for one day the first one is kept and
    /// a `DUPLICATE_REPORT` warning is raised.
    pub fn build(reports: &[AttendanceReport], period: MonthPeriod) -> Self {
        let mut hours: HashMap<String, HashMap<NaiveDate, Decimal>> = HashMap::new();
        let mut warnings = Vec::new();

        for report in reports.iter().filter(|r| period.contains_date(r.date)) {
            let Some(worked) = parse_worked_duration(&report.worked_duration) else {
                warn!(
                    employee_id = %report.employee_id,
                    date = %report.date,
                    duration = %report.worked_duration,
                    "Unparseable worked duration, treating as no report"
                );
                warnings.push(AuditWarning::new(
                    "MALFORMED_DURATION",
                    format!(
                        "Report of {} on {} has unparseable duration '{}'; treated as not filed",
                        report.employee_id, report.date, report.worked_duration
                    ),
                    "medium",
                ));
                continue;
            };

            match hours
                .entry(report.employee_id.clone())
                .or_default()
                .entry(report.date)
            {
                Entry::Vacant(slot) => {
                    slot.insert(worked);
                }
                Entry::Occupied(_) => {
                    warn!(
                        employee_id = %report.employee_id,
                        date = %report.date,
                        "Duplicate report, keeping the first"
                    );
                    warnings.push(AuditWarning::new(
                        "DUPLICATE_REPORT",
                        format!(
                            "{} filed more than one report on {}; the first was used",
                            report.employee_id, report.date
                        ),
                        "low",
                    ));
                }
            }
        }

        Self { hours, warnings }
    }

    /// Returns the decimal hours reported by `employee_id` on `date`, or `None`
    /// if no (parseable) report was filed.
    pub fn worked_hours(&self, date: NaiveDate, employee_id: &str) -> Option<Decimal> {
        self.hours
            .get(employee_id)
            .and_then(|days| days.get(&date))
            .copied()
    }

    /// Number of indexed reports.
    pub fn len(&self) -> usize {
        self.hours.values().map(HashMap::len).sum()
    }

    /// Returns true if no report was indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Anomalies found while indexing.
    pub fn warnings(&self) -> &[AuditWarning] {
        &self.warnings
    }
}
