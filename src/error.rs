//! Error types for the attendance reconciliation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading policy, fetching
//! month data, or reconciling attendance.

use thiserror::Error;

/// The main error type for the attendance reconciliation engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The attendance policy parsed but its values are inconsistent.
    #[error("Invalid attendance policy: {message}")]
    InvalidPolicy {
        /// What is wrong with the policy.
        message: String,
    },

    /// The requested (year, month) selection does not name a calendar month.
    #[error("Invalid period {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month (expected 1..=12).
        month: u32,
    },

    /// One of the four month data sources failed to resolve.
    #[error("Failed to fetch {source_name}: {message}")]
    SourceFetch {
        /// Which source failed ("employees", "reports", "leaves" or "calendars").
        source_name: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
