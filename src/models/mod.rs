//! Core data models for the attendance reconciliation engine.
//!
//! This module contains the inputs the engine consumes (employees, reports,
//! leaves, calendars) and the outputs it derives (day classifications and
//! monthly summaries).

mod attendance_report;
mod attendance_sheet;
mod calendar;
mod day_classification;
mod employee;
mod leave_record;
mod period;

pub use attendance_report::AttendanceReport;
pub use attendance_sheet::{AttendanceSheet, AuditWarning, MonthlySummary};
pub use calendar::{AlternateSaturday, CalendarSnapshot, DayKind, Holiday};
pub use day_classification::{DayCategory, DayClassification};
pub use employee::{Employee, Role, Viewer};
pub use leave_record::{LeaveRecord, LeaveStatus};
pub use period::MonthPeriod;
