//! HTTP API module for the attendance reconciliation engine.
//!
//! This module provides the REST endpoint that reconciles a month of attendance
//! and returns the statistics grid with monthly summaries.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::StatisticsRequest;
pub use response::{ApiError, ApiErrorResponse, GridCell, StatisticsResponse};
pub use state::AppState;
