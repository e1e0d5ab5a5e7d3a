//! Configuration loading for the attendance reconciliation engine.
//!
//! The engine's thresholds (full-day and half-day hours) and payroll constants
//! (monthly paid leave allowance, salary baseline) are loaded from a YAML policy
//! file, falling back to [`AttendancePolicy::default`] when embedded.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance").unwrap();
//! println!("Loaded policy: {}", config.policy().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendancePolicy, DEFAULT_FULL_DAY_HOURS, DEFAULT_HALF_DAY_HOURS,
    DEFAULT_PAID_LEAVE_ALLOWANCE, DEFAULT_SALARY_BASELINE_DAYS, PolicyFile,
};
