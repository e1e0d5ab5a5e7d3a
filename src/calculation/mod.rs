//! Calculation logic for the attendance reconciliation engine.
//!
//! This module contains the calendar classifier, worked-duration parsing, the
//! attendance and leave indices, the priority-ordered day classifier, the monthly
//! deduction fold, and the pipeline that ties them together for one month.

mod attendance_index;
mod day_classifier;
mod day_kind;
mod duration;
mod leave_index;
mod monthly_aggregator;
mod reconcile;

pub use attendance_index::AttendanceIndex;
pub use day_classifier::{DayClassificationResult, DayClassifier, FULL_DAY_UNIT, HALF_DAY_UNIT};
pub use day_kind::OrgCalendar;
pub use duration::parse_worked_duration;
pub use leave_index::{LeaveIndex, LeaveLookup};
pub use monthly_aggregator::{aggregate_month, summarize_employee};
pub use reconcile::{MonthSnapshot, reconcile_month};
