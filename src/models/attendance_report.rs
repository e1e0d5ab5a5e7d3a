//! Daily work-time report model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A daily work-time report filed by an employee.
///
/// `worked_duration` is kept exactly as submitted (`"hh:mm"` or `"hh:mm:ss"`);
/// it is normalized to decimal hours when the attendance index is built.
/// The free-text `report` body plays no part in reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// The employee who filed the report.
    pub employee_id: String,
    /// The calendar day the report covers.
    pub date: NaiveDate,
    /// Worked duration as hours:minutes, optionally with seconds.
    pub worked_duration: String,
    /// Free-text description of the work done.
    #[serde(default)]
    pub report: String,
}
