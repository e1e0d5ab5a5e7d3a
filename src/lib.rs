//! Attendance Reconciliation Engine
//!
//! This crate reconciles a month of daily work-time reports, approved leaves and the
//! organization calendar into a per-employee, per-day classification grid, and folds
//! that grid into the monthly deduction and payable-salary-days figures used by payroll.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod join;
pub mod models;
