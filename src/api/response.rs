//! Response types for the attendance reconciliation API.
//!
//! This module defines the success body of `/statistics`, the error response
//! structures, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    AttendanceSheet, AuditWarning, DayCategory, DayClassification, DayKind, MonthPeriod,
    MonthlySummary,
};

/// One grid cell as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// The employee.
    pub employee_id: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// What the calendar says about the day.
    pub day_kind: DayKind,
    /// The single category the cell falls into.
    pub category: DayCategory,
    /// Amount contributed to the category's bucket.
    pub units: Decimal,
    /// Reported hours rounded to two decimals, `None` without a report.
    pub worked_hours: Option<Decimal>,
    /// Reported hours for display, or `"-"` without a report.
    pub display_hours: String,
    /// Explanation of the rule that produced the category.
    pub reason: String,
}

impl From<DayClassification> for GridCell {
    fn from(cell: DayClassification) -> Self {
        let display_hours = cell.display_hours();
        Self {
            employee_id: cell.employee_id,
            date: cell.date,
            day_kind: cell.day_kind,
            category: cell.category,
            units: cell.units,
            worked_hours: cell.worked_hours.map(|hours| hours.round_dp(2)),
            display_hours,
            reason: cell.reason,
        }
    }
}

/// Response body for the `/statistics` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that performed the calculation.
    pub engine_version: String,
    /// The reconciled month.
    pub period: MonthPeriod,
    /// The reference date used for "past" days.
    pub today: NaiveDate,
    /// One cell per visible employee per day, ordered by employee then date.
    pub grid: Vec<GridCell>,
    /// One summary row per visible employee, rounded to one decimal.
    pub summaries: Vec<MonthlySummary>,
    /// Data anomalies encountered while reconciling.
    pub warnings: Vec<AuditWarning>,
    /// Time taken to reconcile, in microseconds.
    pub duration_us: u64,
}

impl StatisticsResponse {
    /// Wraps a sheet for presentation, rounding the summaries.
    pub fn from_sheet(sheet: AttendanceSheet, today: NaiveDate, duration_us: u64) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            period: sheet.period,
            today,
            grid: sheet.grid.into_iter().map(GridCell::from).collect(),
            summaries: sheet.summaries.iter().map(MonthlySummary::rounded).collect(),
            warnings: sheet.warnings,
            duration_us,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidPolicy { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid attendance policy", message),
            },
            EngineError::InvalidPeriod { year, month } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERIOD",
                    format!("Invalid period {}-{:02}", year, month),
                    "Month must be between 1 and 12 and the year must be a valid calendar year",
                ),
            },
            EngineError::SourceFetch {
                source_name,
                message,
            } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "SOURCE_UNAVAILABLE",
                    format!("Failed to fetch {}", source_name),
                    message,
                ),
            },
        }
    }
}
