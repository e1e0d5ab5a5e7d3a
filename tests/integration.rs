//! Integration tests for the attendance reconciliation API.
//!
//! This test suite covers the reconciliation scenarios end to end:
//! - Grid coverage (one cell per employee per day)
//! - Special/off days are never charged
//! - Work on a special/off day outranks leave
//! - Half-day leave and half days worked
//! - Missing reports for future dates
//! - The monthly deduction formulas
//! - Overlapping leaves and other data anomalies
//! - Viewer scoping
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/attendance").expect("Failed to load config");
    create_router(AppState::new(config))
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_statistics(router: Router, body: Value) -> (StatusCode, Value) {
    post_raw(router, body.to_string(), "application/json").await
}

async fn post_raw(router: Router, body: String, content_type: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/statistics")
                .header("Content-Type", content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn employee(id: &str) -> Value {
    json!({"id": id, "first_name": "Emp", "last_name": id})
}

fn report(employee_id: &str, date: &str, duration: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "date": date,
        "worked_duration": duration,
        "report": "daily work"
    })
}

fn leave(employee_id: &str, from: &str, to: &str, half_day: bool, status: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "from_date": from,
        "to_date": to,
        "is_half_day": half_day,
        "status": status
    })
}

fn holiday(date: &str) -> Value {
    json!({"date": date, "name": "Holiday"})
}

/// A June 2024 request. With `today` on June 1st no day is in the past, so only
/// explicit reports and leaves affect the totals.
fn june_request(today: &str, employees: Vec<Value>) -> Value {
    json!({
        "year": 2024,
        "month": 6,
        "today": today,
        "employees": employees,
        "reports": [],
        "leaves": [],
        "holidays": [],
        "alternate_saturdays": []
    })
}

/// The Ordinary days of June 2024 when no holiday or alternate Saturday is listed.
fn june_ordinary_days() -> Vec<String> {
    (1..=30)
        .filter(|d| ![2, 9, 16, 23, 30].contains(d))
        .map(|d| format!("2024-06-{:02}", d))
        .collect()
}

fn cell<'a>(result: &'a Value, employee_id: &str, date: &str) -> &'a Value {
    result["grid"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["employee_id"] == employee_id && c["date"] == date)
        .unwrap_or_else(|| panic!("no cell for {} on {}", employee_id, date))
}

fn summary<'a>(result: &'a Value, employee_id: &str) -> &'a Value {
    result["summaries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["employee_id"] == employee_id)
        .unwrap_or_else(|| panic!("no summary for {}", employee_id))
}

fn assert_summary_field(result: &Value, employee_id: &str, field: &str, expected: &str) {
    let actual = summary(result, employee_id)[field].as_str().unwrap();
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

// =============================================================================
// SECTION 1: Grid Coverage
// =============================================================================

#[tokio::test]
async fn test_grid_has_one_cell_per_employee_day() {
    let router = create_router_for_test();
    let request = june_request("2024-07-01", vec![employee("a"), employee("b"), employee("c")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let grid = result["grid"].as_array().unwrap();
    assert_eq!(grid.len(), 90);

    for id in ["a", "b", "c"] {
        let dates: Vec<&str> = grid
            .iter()
            .filter(|c| c["employee_id"] == id)
            .map(|c| c["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], "2024-06-01");
        assert_eq!(dates[29], "2024-06-30");
    }
}

#[tokio::test]
async fn test_empty_directory_gives_empty_sheet() {
    let router = create_router_for_test();
    let (status, result) = post_statistics(router, june_request("2024-07-01", vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["grid"].as_array().unwrap().is_empty());
    assert!(result["summaries"].as_array().unwrap().is_empty());
}

// =============================================================================
// SECTION 2: Special/Off Days Are Never Charged
// =============================================================================

#[tokio::test]
async fn test_off_days_without_reports_not_charged() {
    let router = create_router_for_test();
    let mut request = june_request("2024-07-01", vec![employee("a")]);
    request["holidays"] = json!([holiday("2024-06-17")]);
    request["alternate_saturdays"] = json!([{"date": "2024-06-08"}]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    for (date, kind) in [
        ("2024-06-02", "weekly_off"),
        ("2024-06-08", "alternate_saturday_off"),
        ("2024-06-17", "holiday"),
    ] {
        let cell = cell(&result, "a", date);
        assert_eq!(cell["day_kind"], kind);
        assert_eq!(cell["category"], "normal");
    }
    // 30 days - 5 Sundays - 1 holiday - 1 alternate Saturday
    assert_eq!(summary(&result, "a")["absent_days"], 23);
}

#[tokio::test]
async fn test_leave_on_sunday_without_work_not_charged() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["leaves"] = json!([leave("a", "2024-06-09", "2024-06-09", false, "approved")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cell(&result, "a", "2024-06-09")["category"], "normal");
    assert_summary_field(&result, "a", "leave_taken_total", "0");
}

// =============================================================================
// SECTION 3: Work on Special/Off Days
// =============================================================================

#[tokio::test]
async fn test_work_on_holiday_with_leave_is_bonus() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["holidays"] = json!([holiday("2024-06-17")]);
    request["reports"] = json!([report("a", "2024-06-17", "09:00")]);
    request["leaves"] = json!([leave("a", "2024-06-17", "2024-06-17", false, "approved")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let cell = cell(&result, "a", "2024-06-17");
    assert_eq!(cell["category"], "extra_work_bonus");
    assert_summary_field(&result, "a", "extra_working_days_total", "1");
    assert_summary_field(&result, "a", "leave_taken_total", "0");
}

#[tokio::test]
async fn test_short_work_on_sunday_is_half_bonus() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["reports"] = json!([report("a", "2024-06-16", "03:15")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_summary_field(&result, "a", "extra_working_days_total", "0.5");
    // (0.5 + 1) - 0 = 1.5
    assert_summary_field(&result, "a", "net_deduction", "1.5");
    assert_summary_field(&result, "a", "payable_salary_days", "31.5");
}

// =============================================================================
// SECTION 4: Leaves and Half Days
// =============================================================================

#[tokio::test]
async fn test_half_day_leave_charges_half() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["leaves"] = json!([leave("a", "2024-06-12", "2024-06-12", true, "approved")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cell(&result, "a", "2024-06-12")["category"], "leave_charged");
    assert_summary_field(&result, "a", "leave_taken_total", "0.5");
}

#[tokio::test]
async fn test_pending_and_rejected_leaves_ignored() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["leaves"] = json!([
        leave("a", "2024-06-10", "2024-06-11", false, "pending"),
        leave("a", "2024-06-12", "2024-06-12", false, "rejected"),
        leave("a", "2024-06-13", "2024-06-13", false, "withdrawn"),
    ]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_summary_field(&result, "a", "leave_taken_total", "0");
}

#[tokio::test]
async fn test_half_days_worked_reduce_net() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["reports"] = json!([
        report("a", "2024-06-03", "04:00"),
        report("a", "2024-06-04", "07:30"),
    ]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary(&result, "a")["half_days_worked"], 2);
    assert_summary_field(&result, "a", "half_day_worked_total", "1");
    assert_summary_field(&result, "a", "net_deduction", "0");
    assert_summary_field(&result, "a", "payable_salary_days", "30");
}

#[tokio::test]
async fn test_under_half_day_is_absence() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["reports"] = json!([report("a", "2024-06-05", "03:59")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cell(&result, "a", "2024-06-05")["category"], "absence_charged");
    assert_summary_field(&result, "a", "leave_taken_total", "1");
}

// =============================================================================
// SECTION 5: Missing Reports and Today
// =============================================================================

#[tokio::test]
async fn test_missing_reports_after_today_not_charged() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-20", vec![employee("a")]);
    let reports: Vec<Value> = june_ordinary_days()
        .iter()
        .filter(|d| d.as_str() < "2024-06-20")
        .map(|d| report("a", d, "08:00"))
        .collect();
    request["reports"] = json!(reports);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cell(&result, "a", "2024-06-20")["category"], "normal");
    assert_eq!(cell(&result, "a", "2024-06-27")["category"], "normal");
    assert_summary_field(&result, "a", "leave_taken_total", "0");
    assert_summary_field(&result, "a", "payable_salary_days", "31");
}

#[tokio::test]
async fn test_missing_report_before_today_is_absence() {
    let router = create_router_for_test();
    let request = june_request("2024-06-04", vec![employee("a")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    // June 1 (Saturday) and June 3 are past Ordinary days; June 2 is Sunday
    assert_eq!(summary(&result, "a")["absent_days"], 2);
    assert_eq!(cell(&result, "a", "2024-06-04")["category"], "normal");
}

// =============================================================================
// SECTION 6: Monthly Formulas
// =============================================================================

#[tokio::test]
async fn test_june_2024_worked_example() {
    let router = create_router_for_test();
    let mut request = june_request("2024-07-01", vec![employee("E")]);
    let mut reports: Vec<Value> = june_ordinary_days()
        .iter()
        .filter(|d| d.as_str() != "2024-06-10" && d.as_str() != "2024-06-15")
        .map(|d| report("E", d, "09:00"))
        .collect();
    reports.push(report("E", "2024-06-02", "09:00"));
    request["reports"] = json!(reports);
    request["leaves"] = json!([leave("E", "2024-06-10", "2024-06-10", true, "approved")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_summary_field(&result, "E", "extra_working_days_total", "1.0");
    assert_summary_field(&result, "E", "leave_taken_total", "1.5");
    assert_summary_field(&result, "E", "half_day_worked_total", "0");
    assert_summary_field(&result, "E", "paid_leave_allowance", "1");
    assert_summary_field(&result, "E", "net_deduction", "0.5");
    assert_summary_field(&result, "E", "payable_salary_days", "30.5");
}

#[tokio::test]
async fn test_eight_and_a_half_hours_is_normal() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["reports"] = json!([report("a", "2024-06-12", "08:30:00")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let cell = cell(&result, "a", "2024-06-12");
    assert_eq!(normalize_decimal(cell["worked_hours"].as_str().unwrap()), "8.5");
    assert_eq!(cell["category"], "normal");
}

#[tokio::test]
async fn test_summaries_satisfy_formula_identities() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-20", vec![employee("a"), employee("b")]);
    request["holidays"] = json!([holiday("2024-06-17")]);
    request["reports"] = json!([
        report("a", "2024-06-03", "05:00"),
        report("a", "2024-06-17", "06:00"),
        report("b", "2024-06-09", "10:00"),
        report("b", "2024-06-04", "01:00"),
    ]);
    request["leaves"] = json!([
        leave("a", "2024-06-05", "2024-06-07", false, "approved"),
        leave("b", "2024-06-11", "2024-06-11", true, "approved"),
    ]);

    let (status, result) = post_statistics(router, request).await;
    assert_eq!(status, StatusCode::OK);

    let dec = |v: &Value| Decimal::from_str(v.as_str().unwrap()).unwrap();
    for s in result["summaries"].as_array().unwrap() {
        let net = (dec(&s["extra_working_days_total"]) + dec(&s["paid_leave_allowance"]))
            - (dec(&s["leave_taken_total"]) + dec(&s["half_day_worked_total"]));
        assert_eq!(dec(&s["net_deduction"]), net);
        assert_eq!(
            dec(&s["payable_salary_days"]),
            dec(&s["net_deduction"]) + Decimal::from(30)
        );
    }
}

// =============================================================================
// SECTION 7: Data Anomalies
// =============================================================================

#[tokio::test]
async fn test_overlapping_leaves_charged_once() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["leaves"] = json!([
        leave("a", "2024-06-10", "2024-06-11", false, "approved"),
        leave("a", "2024-06-11", "2024-06-11", false, "approved"),
    ]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_summary_field(&result, "a", "leave_taken_total", "2");
    let warnings = result["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "OVERLAPPING_LEAVE"));
}

#[tokio::test]
async fn test_malformed_duration_reported_as_warning() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-20", vec![employee("a")]);
    request["reports"] = json!([report("a", "2024-06-03", "eight")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cell(&result, "a", "2024-06-03")["category"], "absence_charged");
    let warnings = result["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "MALFORMED_DURATION"));
}

#[tokio::test]
async fn test_duplicate_employee_entry_charged_once() {
    let router = create_router_for_test();
    let request = june_request("2024-07-01", vec![employee("a"), employee("a")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["grid"].as_array().unwrap().len(), 30);
    assert_eq!(result["summaries"].as_array().unwrap().len(), 1);
    // Every Ordinary day unreported and in the past, charged once
    assert_summary_field(&result, "a", "leave_taken_total", "25");
    let warnings = result["warnings"].as_array().unwrap();
    assert!(warnings.iter().any(|w| w["code"] == "DUPLICATE_EMPLOYEE"));
}

#[tokio::test]
async fn test_reports_outside_month_ignored() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["reports"] = json!([
        report("a", "2024-05-26", "09:00"),
        report("a", "2024-07-07", "09:00"),
    ]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_summary_field(&result, "a", "extra_working_days_total", "0");
}

// =============================================================================
// SECTION 8: Viewer Scoping
// =============================================================================

#[tokio::test]
async fn test_employee_viewer_sees_only_own_row() {
    let router = create_router_for_test();
    let mut request = june_request("2024-07-01", vec![employee("a"), employee("b")]);
    request["viewer"] = json!({"role": "employee", "employee_id": "b"});

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let summaries = result["summaries"].as_array().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["employee_id"], "b");
    assert_eq!(result["grid"].as_array().unwrap().len(), 30);
}

#[tokio::test]
async fn test_admin_viewer_sees_everyone() {
    let router = create_router_for_test();
    let mut request = june_request("2024-07-01", vec![employee("a"), employee("b")]);
    request["viewer"] = json!({"role": "admin", "employee_id": "a"});

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["summaries"].as_array().unwrap().len(), 2);
}

// =============================================================================
// SECTION 9: Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let router = create_router_for_test();
    let (status, result) =
        post_raw(router, "{\"year\": 2024,".to_string(), "application/json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_month_returns_validation_error() {
    let router = create_router_for_test();
    let (status, result) = post_statistics(router, json!({"year": 2024, "employees": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert!(result["message"].as_str().unwrap().contains("month"));
}

#[tokio::test]
async fn test_month_zero_returns_invalid_period() {
    let router = create_router_for_test();
    let (status, result) =
        post_statistics(router, json!({"year": 2024, "month": 0, "employees": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_bad_date_returns_malformed_json() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-01", vec![employee("a")]);
    request["reports"] = json!([report("a", "2024-06-31", "08:00")]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let router = create_router_for_test();
    let body = june_request("2024-06-01", vec![]).to_string();
    let (status, result) = post_raw(router, body, "text/plain").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MISSING_CONTENT_TYPE");
}

// =============================================================================
// SECTION 10: Response Fields
// =============================================================================

#[tokio::test]
async fn test_result_contains_all_required_fields() {
    let router = create_router_for_test();
    let (status, result) =
        post_statistics(router, june_request("2024-06-20", vec![employee("a")])).await;

    assert_eq!(status, StatusCode::OK);

    assert!(result["calculation_id"].is_string());
    assert!(result["timestamp"].is_string());
    assert!(result["engine_version"].is_string());
    assert_eq!(result["today"], "2024-06-20");
    assert_eq!(result["period"]["year"], 2024);
    assert_eq!(result["period"]["first_day"], "2024-06-01");
    assert!(result["duration_us"].is_u64());
    assert!(result["warnings"].is_array());

    let summary = summary(&result, "a");
    assert_eq!(summary["employee_name"], "Emp a");
    assert!(summary["net_deduction"].is_string());
    assert!(summary["payable_salary_days"].is_string());
}

#[tokio::test]
async fn test_grid_cell_contains_required_fields() {
    let router = create_router_for_test();
    let mut request = june_request("2024-06-20", vec![employee("a")]);
    request["reports"] = json!([
        report("a", "2024-06-03", "05:00"),
        report("a", "2024-06-05", "07:20"),
    ]);

    let (status, result) = post_statistics(router, request).await;

    assert_eq!(status, StatusCode::OK);
    // No report filed: hours are null and displayed as a dash
    let unreported = cell(&result, "a", "2024-06-04");
    assert!(unreported["worked_hours"].is_null());
    assert_eq!(unreported["display_hours"], "-");

    // 07:20 is 7.333... hours, presented with two decimals
    let thirds = cell(&result, "a", "2024-06-05");
    assert_eq!(thirds["display_hours"], "7.33");
    assert_eq!(thirds["worked_hours"], "7.33");

    let cell = cell(&result, "a", "2024-06-03");
    assert_eq!(cell["day_kind"], "ordinary");
    assert_eq!(cell["category"], "half_day_worked");
    assert_eq!(normalize_decimal(cell["units"].as_str().unwrap()), "0.5");
    assert_eq!(cell["display_hours"], "5");
    assert!(cell["reason"].as_str().unwrap().contains("half day"));
}
