//! Router tests against an in-memory trial balance store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use rstest::rstest;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;
use trialview_api::{AppState, create_router};
use trialview_core::reports::{InMemorySource, LedgerGroup, SnapshotEntry};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn state() -> AppState {
    let source = InMemorySource::new()
        .with_ledger("R1", "Sales", LedgerGroup::Revenue)
        .with_ledger("E1", "Rent", LedgerGroup::Expense)
        .with_ledger("A1", "Cash", LedgerGroup::Asset)
        .with_ledger("L1", "Loan", LedgerGroup::Liability)
        .with_snapshot(
            date(2024, 1, 31),
            vec![
                SnapshotEntry::new("R1", dec!(-100)),
                SnapshotEntry::new("E1", dec!(40)),
                SnapshotEntry::new("A1", dec!(500)),
                SnapshotEntry::new("L1", dec!(-200)),
            ],
        );
    AppState::new(Arc::new(source))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = create_router(state())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_list_reports() {
    let (status, body) = get("/api/v1/reports").await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["slug"].as_str().unwrap())
        .collect();
    assert_eq!(
        slugs,
        ["financial-accounting-reports", "delta-report", "custom-pnl-report"]
    );
}

#[tokio::test]
async fn test_profit_and_loss_page() {
    let (status, body) = get(
        "/api/v1/reports/financial-accounting-reports\
         ?from_date=2024-01-01&to_date=2024-12-31&report=Profit%20and%20Loss%20Statement",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["columns"].as_array().unwrap().len(), 4);
    assert_eq!(body["chart"]["type"], "axis-mixed");
    assert_eq!(body["report_summary"][0]["value"], "60");
    assert_eq!(body["report_summary"][0]["indicator"], "Green");

    let profit = body["result"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["group"] == "Profit/Loss")
        .unwrap();
    assert_eq!(profit["31-01-2024"], 60.0);
}

#[tokio::test]
async fn test_no_filters_returns_empty_report() {
    let (status, body) = get("/api/v1/reports/delta-report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["columns"], Value::Array(vec![]));
    assert_eq!(body["result"], Value::Array(vec![]));
}

#[rstest]
#[case("/api/v1/reports/delta-report?from_date=2024-13-01", StatusCode::BAD_REQUEST)]
#[case("/api/v1/reports/delta-report?from_date=2024-12-31&to_date=2024-01-01", StatusCode::BAD_REQUEST)]
#[case("/api/v1/reports/financial-accounting-reports?from_date=2024-01-01&report=Equity", StatusCode::BAD_REQUEST)]
#[case("/api/v1/reports/unknown", StatusCode::NOT_FOUND)]
#[tokio::test]
async fn test_rejected_requests(#[case] uri: &str, #[case] expected: StatusCode) {
    let (status, body) = get(uri).await;
    assert_eq!(status, expected);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_viewer_metadata() {
    let (status, body) = get("/api/v1/reports/custom-pnl-report/viewer").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Custom PnL Report");
    assert_eq!(body["filters"].as_array().unwrap().len(), 2);
}
