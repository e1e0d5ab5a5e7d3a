//! Leave request model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Workflow status of a leave request.
///
/// Statuses the engine does not know about deserialize to [`LeaveStatus::Unknown`]
/// and are excluded like any other non-approved status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Approved; the only status that affects attendance.
    Approved,
    /// Awaiting a decision.
    Pending,
    /// Declined.
    Rejected,
    /// Any status string not listed above.
    #[serde(other)]
    Unknown,
}

/// A leave request covering a closed date interval.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{LeaveRecord, LeaveStatus};
/// use chrono::NaiveDate;
///
/// let leave = LeaveRecord {
///     employee_id: "emp_001".to_string(),
///     from_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
///     to_date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
///     is_half_day: false,
///     status: LeaveStatus::Approved,
/// };
/// assert!(leave.covers(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()));
/// assert!(!leave.covers(NaiveDate::from_ymd_opt(2024, 6, 13).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// The employee on leave.
    pub employee_id: String,
    /// First day of leave (inclusive).
    pub from_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub to_date: NaiveDate,
    /// Whether each day of the interval is a half-day leave.
    #[serde(default)]
    pub is_half_day: bool,
    /// Workflow status.
    pub status: LeaveStatus,
}

impl LeaveRecord {
    /// Returns true if the record has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Checks if `date` falls within `[from_date, to_date]`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.from_date <= date && date <= self.to_date
    }
}
