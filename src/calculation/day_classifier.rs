//! Day classification.
//!
//! This module assigns exactly one [`DayCategory`] to every employee-day by
//! combining the calendar's day kind, the filed worked hours and the approved
//! leave lookup.
//!
//! Rules are evaluated in strict priority order, first match wins:
//!
//! 1. Work on a special/off day earns an extra-working-day bonus (1.0 at or above
//!    the full-day threshold, 0.5 below it). This is checked before leave so that
//!    working on an off day always overrides a leave record for the same date.
//! 2. Approved leave is charged (0.5 for half-day leave, 1.0 otherwise) on
//!    Ordinary days only. Leave on an off day without work is not charged. A stray
//!    report on an Ordinary leave day is ignored.
//! 3. An Ordinary day in the past with no report is charged as an absence.
//!    Today and future days are not charged.
//! 4. An Ordinary day with fewer hours than the half-day threshold is charged as
//!    an absence.
//! 5. An Ordinary day with at least the half-day threshold but less than a full
//!    day is a half day worked.
//! 6. Everything else is normal.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::AttendancePolicy;
use crate::models::{AuditWarning, DayCategory, DayClassification, DayKind};

use super::{AttendanceIndex, LeaveIndex, LeaveLookup, OrgCalendar};

/// One full day unit.
pub const FULL_DAY_UNIT: Decimal = Decimal::ONE;

/// One half-day unit.
pub const HALF_DAY_UNIT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// The result of classifying one employee-day, including any anomaly it revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayClassificationResult {
    /// The cell.
    pub classification: DayClassification,
    /// Set when overlapping approved leave records cover the day.
    pub warning: Option<AuditWarning>,
}

/// Classifies employee-days against a fixed snapshot of the month's inputs.
///
/// `today` is an explicit input so that the same snapshot always classifies the
/// same way.
#[derive(Debug, Clone, Copy)]
pub struct DayClassifier<'a> {
    calendar: &'a OrgCalendar,
    attendance: &'a AttendanceIndex,
    leaves: &'a LeaveIndex,
    policy: &'a AttendancePolicy,
    today: NaiveDate,
}

impl<'a> DayClassifier<'a> {
    /// Creates a classifier over the built indices.
    pub fn new(
        calendar: &'a OrgCalendar,
        attendance: &'a AttendanceIndex,
        leaves: &'a LeaveIndex,
        policy: &'a AttendancePolicy,
        today: NaiveDate,
    ) -> Self {
        Self {
            calendar,
            attendance,
            leaves,
            policy,
            today,
        }
    }

    /// Classifies `employee_id` on `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::calculation::{AttendanceIndex, DayClassifier, LeaveIndex, OrgCalendar};
    /// use attendance_engine::config::AttendancePolicy;
    /// use attendance_engine::models::{AttendanceReport, DayCategory, MonthPeriod};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let june = MonthPeriod::new(2024, 6).unwrap();
    /// // 2024-06-02 is a Sunday
    /// let sunday = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    /// let attendance = AttendanceIndex::build(
    ///     &[AttendanceReport {
    ///         employee_id: "emp_001".to_string(),
    ///         date: sunday,
    ///         worked_duration: "09:00".to_string(),
    ///         report: String::new(),
    ///     }],
    ///     june,
    /// );
    /// let calendar = OrgCalendar::default();
    /// let leaves = LeaveIndex::default();
    /// let policy = AttendancePolicy::default();
    /// let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    ///
    /// let classifier = DayClassifier::new(&calendar, &attendance, &leaves, &policy, today);
    /// let cell = classifier.classify("emp_001", sunday).classification;
    /// assert_eq!(cell.category, DayCategory::ExtraWorkBonus);
    /// assert_eq!(cell.units, Decimal::ONE);
    /// ```
    pub fn classify(&self, employee_id: &str, date: NaiveDate) -> DayClassificationResult {
        let day_kind = self.calendar.day_kind(date);
        let worked_hours = self.attendance.worked_hours(date, employee_id);
        let leave = self.leaves.leave_for(employee_id, date);

        let warning = leave.is_overlapping().then(|| {
            warn!(
                employee_id = %employee_id,
                date = %date,
                records = leave.matching_records,
                "Overlapping approved leave, using the first record"
            );
            AuditWarning::new(
                "OVERLAPPING_LEAVE",
                format!(
                    "{} approved leave records cover {} for {}; charged once using the first",
                    leave.matching_records, date, employee_id
                ),
                "medium",
            )
        });

        let (category, units, reason) = self.decide(date, day_kind, worked_hours, leave);

        DayClassificationResult {
            classification: DayClassification {
                employee_id: employee_id.to_string(),
                date,
                day_kind,
                category,
                units,
                worked_hours,
                reason,
            },
            warning,
        }
    }

    fn decide(
        &self,
        date: NaiveDate,
        day_kind: DayKind,
        worked_hours: Option<Decimal>,
        leave: LeaveLookup,
    ) -> (DayCategory, Decimal, String) {
        let full_day = self.policy.full_day_hours;
        let half_day = self.policy.half_day_hours;

        // Rule 1: work on a special/off day
        if day_kind.is_off_day() {
            if let Some(hours) = worked_hours.filter(|h| *h > Decimal::ZERO) {
                let units = if hours >= full_day {
                    FULL_DAY_UNIT
                } else {
                    HALF_DAY_UNIT
                };
                return (
                    DayCategory::ExtraWorkBonus,
                    units,
                    format!(
                        "Worked {} hours on {}: {} extra working day",
                        hours.round_dp(2).normalize(),
                        day_kind,
                        units.normalize()
                    ),
                );
            }
        }

        // Rule 2: approved leave
        if leave.is_on_leave {
            if day_kind.is_off_day() {
                return (
                    DayCategory::Normal,
                    Decimal::ZERO,
                    format!("Approved leave on {} is not charged", day_kind),
                );
            }
            let (units, label) = if leave.is_half_day {
                (HALF_DAY_UNIT, "half-day leave")
            } else {
                (FULL_DAY_UNIT, "leave")
            };
            return (
                DayCategory::LeaveCharged,
                units,
                format!("Approved {}: {} day charged", label, units.normalize()),
            );
        }

        if day_kind.is_off_day() {
            return (DayCategory::Normal, Decimal::ZERO, format!("{} off", day_kind));
        }

        match worked_hours {
            // Rule 3: missing report
            None if date < self.today => (
                DayCategory::AbsenceCharged,
                FULL_DAY_UNIT,
                "No report filed for a past working day: absence charged".to_string(),
            ),
            None => (
                DayCategory::Normal,
                Decimal::ZERO,
                "No report yet for an upcoming working day".to_string(),
            ),
            // Rule 4: short hours
            Some(hours) if hours < half_day => (
                DayCategory::AbsenceCharged,
                FULL_DAY_UNIT,
                format!(
                    "Worked {} hours (below {}): absence charged",
                    hours.round_dp(2).normalize(),
                    half_day.normalize()
                ),
            ),
            // Rule 5: half day
            Some(hours) if hours < full_day => (
                DayCategory::HalfDayWorked,
                HALF_DAY_UNIT,
                format!(
                    "Worked {} hours (below {}): half day",
                    hours.round_dp(2).normalize(),
                    full_day.normalize()
                ),
            ),
            // Rule 6: full day
            Some(hours) => (
                DayCategory::Normal,
                Decimal::ZERO,
                format!("Worked {} hours: full day", hours.round_dp(2).normalize()),
            ),
        }
    }
}
