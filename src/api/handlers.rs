//! HTTP request handlers for the attendance reconciliation API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{MonthSnapshot, reconcile_month};
use crate::config::AttendancePolicy;
use crate::error::EngineResult;
use crate::models::MonthPeriod;

use super::request::StatisticsRequest;
use super::response::{ApiError, ApiErrorResponse, StatisticsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/statistics", post(statistics_handler))
        .with_state(state)
}

/// Handler for POST /statistics endpoint.
///
/// Accepts a month selection with its inputs and returns the reconciled grid and
/// monthly summaries.
async fn statistics_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatisticsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing statistics request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    match perform_reconciliation(request, today, state.policy()) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                period = %response.period,
                employees = response.summaries.len(),
                warnings = response.warnings.len(),
                duration_us = response.duration_us,
                "Statistics computed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Statistics request rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Validates the selection and reconciles the month.
fn perform_reconciliation(
    request: StatisticsRequest,
    today: NaiveDate,
    policy: &AttendancePolicy,
) -> EngineResult<StatisticsResponse> {
    let start_time = Instant::now();

    let period = MonthPeriod::new(request.year, request.month)?;
    let viewer = request.viewer_or_admin();
    let snapshot: MonthSnapshot = request.into();

    let sheet = reconcile_month(&snapshot, period, &viewer, today, policy);
    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(StatisticsResponse::from_sheet(sheet, today, duration_us))
}
