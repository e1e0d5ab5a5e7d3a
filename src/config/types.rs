//! Configuration types for attendance reconciliation.
//!
//! This module contains the strongly-typed policy structures that are
//! deserialized from the YAML configuration file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Worked hours at or above which a day counts as a full day.
pub const DEFAULT_FULL_DAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Worked hours below which a reported Ordinary day is treated as an absence.
pub const DEFAULT_HALF_DAY_HOURS: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Paid leave granted to every employee each month.
pub const DEFAULT_PAID_LEAVE_ALLOWANCE: Decimal = Decimal::ONE;

/// Nominal days-in-month baseline used for payable salary days.
///
/// This is a fixed payroll constant, not the number of calendar days in the month.
pub const DEFAULT_SALARY_BASELINE_DAYS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// The thresholds and constants that drive day classification and the monthly fold.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendancePolicy;
/// use rust_decimal::Decimal;
///
/// let policy = AttendancePolicy::default();
/// assert_eq!(policy.full_day_hours, Decimal::from(8));
/// assert_eq!(policy.salary_baseline_days, Decimal::from(30));
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePolicy {
    /// Human-readable name of the policy.
    #[serde(default = "default_policy_name")]
    pub name: String,
    /// Hours at or above which a worked day is a full day.
    pub full_day_hours: Decimal,
    /// Hours below which a worked Ordinary day is charged as an absence.
    pub half_day_hours: Decimal,
    /// Monthly paid leave allowance credited to every employee.
    pub paid_leave_allowance: Decimal,
    /// Baseline added to the net deduction to obtain payable salary days.
    pub salary_baseline_days: Decimal,
}

fn default_policy_name() -> String {
    "Standard monthly attendance".to_string()
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            name: default_policy_name(),
            full_day_hours: DEFAULT_FULL_DAY_HOURS,
            half_day_hours: DEFAULT_HALF_DAY_HOURS,
            paid_leave_allowance: DEFAULT_PAID_LEAVE_ALLOWANCE,
            salary_baseline_days: DEFAULT_SALARY_BASELINE_DAYS,
        }
    }
}

impl AttendancePolicy {
    /// Checks that the thresholds are ordered and the constants are non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.half_day_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidPolicy {
                message: format!("half_day_hours must be positive, got {}", self.half_day_hours),
            });
        }
        if self.half_day_hours >= self.full_day_hours {
            return Err(EngineError::InvalidPolicy {
                message: format!(
                    "half_day_hours ({}) must be below full_day_hours ({})",
                    self.half_day_hours, self.full_day_hours
                ),
            });
        }
        if self.paid_leave_allowance.is_sign_negative() {
            return Err(EngineError::InvalidPolicy {
                message: "paid_leave_allowance must not be negative".to_string(),
            });
        }
        if self.salary_baseline_days.is_sign_negative() {
            return Err(EngineError::InvalidPolicy {
                message: "salary_baseline_days must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Policy configuration file structure (`policy.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// The attendance policy section.
    pub policy: AttendancePolicy,
}
