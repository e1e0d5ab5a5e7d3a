//! Month data sources.
//!
//! This module defines the [`AttendanceSource`] abstraction the join controller
//! fetches from, so that the remote store can be swapped for an in-memory one in
//! tests and batch runs.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{
    AlternateSaturday, AttendanceReport, CalendarSnapshot, Employee, Holiday, LeaveRecord,
    MonthPeriod,
};

/// The four independent inputs of a month reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// The employees directory.
    Employees,
    /// Daily work-time reports.
    Reports,
    /// Leave records.
    Leaves,
    /// Holidays and alternate Saturdays.
    Calendars,
}

impl SourceKind {
    /// All four sources in fetch order.
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Employees,
        SourceKind::Reports,
        SourceKind::Leaves,
        SourceKind::Calendars,
    ];

    /// The lowercase name used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Employees => "employees",
            SourceKind::Reports => "reports",
            SourceKind::Leaves => "leaves",
            SourceKind::Calendars => "calendars",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one source fared during the current fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    /// Still outstanding.
    Pending,
    /// Resolved with data.
    Resolved,
    /// Failed; the message comes from the source error.
    Failed {
        /// What went wrong.
        message: String,
    },
}

impl SourceStatus {
    /// Returns true if the source resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(self, SourceStatus::Resolved)
    }
}

/// Trait defining the interface to the month data store.
///
/// Every fetch is scoped to one month. Implementations may return more than the
/// month; the engine filters to the window itself.
#[async_trait]
pub trait AttendanceSource: Send + Sync {
    /// Fetch the employees directory.
    async fn fetch_employees(&self, period: MonthPeriod) -> EngineResult<Vec<Employee>>;

    /// Fetch the daily reports filed within the month.
    async fn fetch_reports(&self, period: MonthPeriod) -> EngineResult<Vec<AttendanceReport>>;

    /// Fetch the leave records overlapping the month.
    async fn fetch_leaves(&self, period: MonthPeriod) -> EngineResult<Vec<LeaveRecord>>;

    /// Fetch the holiday and alternate-Saturday calendars for the month.
    async fn fetch_calendar(&self, period: MonthPeriod) -> EngineResult<CalendarSnapshot>;
}

/// An in-memory source over fixed collections.
///
/// Reports, leaves and calendar entries are filtered to the requested month.
///
/// # Example
///
/// ```
/// use attendance_engine::join::{AttendanceSource, SnapshotSource};
/// use attendance_engine::models::{Holiday, MonthPeriod};
/// use chrono::NaiveDate;
///
/// let source = SnapshotSource::default().with_holidays(vec![
///     Holiday {
///         date: NaiveDate::from_ymd_opt(2024, 6, 17).unwrap(),
///         name: "Founders Day".to_string(),
///     },
///     Holiday {
///         date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
///         name: "Summer Day".to_string(),
///     },
/// ]);
/// let june = MonthPeriod::new(2024, 6).unwrap();
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let calendar = runtime.block_on(source.fetch_calendar(june)).unwrap();
/// assert_eq!(calendar.holidays.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    employees: Vec<Employee>,
    reports: Vec<AttendanceReport>,
    leaves: Vec<LeaveRecord>,
    calendar: CalendarSnapshot,
}

impl SnapshotSource {
    /// Creates a source over the given collections.
    pub fn new(
        employees: Vec<Employee>,
        reports: Vec<AttendanceReport>,
        leaves: Vec<LeaveRecord>,
        calendar: CalendarSnapshot,
    ) -> Self {
        Self {
            employees,
            reports,
            leaves,
            calendar,
        }
    }

    /// Replaces the employees directory.
    pub fn with_employees(mut self, employees: Vec<Employee>) -> Self {
        self.employees = employees;
        self
    }

    /// Replaces the daily reports.
    pub fn with_reports(mut self, reports: Vec<AttendanceReport>) -> Self {
        self.reports = reports;
        self
    }

    /// Replaces the leave records.
    pub fn with_leaves(mut self, leaves: Vec<LeaveRecord>) -> Self {
        self.leaves = leaves;
        self
    }

    /// Replaces the holidays.
    pub fn with_holidays(mut self, holidays: Vec<Holiday>) -> Self {
        self.calendar.holidays = holidays;
        self
    }

    /// Replaces the alternate Saturdays.
    pub fn with_alternate_saturdays(
        mut self,
        alternate_saturdays: Vec<AlternateSaturday>,
    ) -> Self {
        self.calendar.alternate_saturdays = alternate_saturdays;
        self
    }
}

#[async_trait]
impl AttendanceSource for SnapshotSource {
    async fn fetch_employees(&self, _period: MonthPeriod) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.clone())
    }

    async fn fetch_reports(&self, period: MonthPeriod) -> EngineResult<Vec<AttendanceReport>> {
        Ok(self
            .reports
            .iter()
            .filter(|r| period.contains_date(r.date))
            .cloned()
            .collect())
    }

    async fn fetch_leaves(&self, period: MonthPeriod) -> EngineResult<Vec<LeaveRecord>> {
        // Inverted ranges are passed through so the leave index can flag them
        Ok(self
            .leaves
            .iter()
            .filter(|l| {
                period.overlaps(l.from_date.min(l.to_date), l.from_date.max(l.to_date))
            })
            .cloned()
            .collect())
    }

    async fn fetch_calendar(&self, period: MonthPeriod) -> EngineResult<CalendarSnapshot> {
        Ok(CalendarSnapshot {
            holidays: self
                .calendar
                .holidays
                .iter()
                .filter(|h| period.contains_date(h.date))
                .cloned()
                .collect(),
            alternate_saturdays: self
                .calendar
                .alternate_saturdays
                .iter()
                .filter(|s| period.contains_date(s.date))
                .cloned()
                .collect(),
        })
    }
}
