//! Request types for the attendance reconciliation API.
//!
//! This module defines the JSON request structure for the `/statistics` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::MonthSnapshot;
use crate::models::{
    AlternateSaturday, AttendanceReport, CalendarSnapshot, Employee, Holiday, LeaveRecord, Viewer,
};

/// Request body for the `/statistics` endpoint.
///
/// Carries the month selection and the four month inputs, already fetched by the
/// caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsRequest {
    /// The selected year.
    pub year: i32,
    /// The selected month (1-12).
    pub month: u32,
    /// The reference date for "past" days. Defaults to the server's local date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
    /// Whose statistics are requested. Defaults to an administrator view.
    #[serde(default)]
    pub viewer: Option<Viewer>,
    /// The employees directory.
    pub employees: Vec<Employee>,
    /// Daily work-time reports.
    #[serde(default)]
    pub reports: Vec<AttendanceReport>,
    /// Leave records of any status.
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
    /// Organization holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Organization alternate Saturdays.
    #[serde(default)]
    pub alternate_saturdays: Vec<AlternateSaturday>,
}

impl StatisticsRequest {
    /// The requested viewer, or an administrator view when none was given.
    pub fn viewer_or_admin(&self) -> Viewer {
        self.viewer.clone().unwrap_or_else(|| Viewer::admin(""))
    }
}

impl From<StatisticsRequest> for MonthSnapshot {
    fn from(req: StatisticsRequest) -> Self {
        MonthSnapshot {
            employees: req.employees,
            reports: req.reports,
            leaves: req.leaves,
            calendar: CalendarSnapshot {
                holidays: req.holidays,
                alternate_saturdays: req.alternate_saturdays,
            },
        }
    }
}
