//! Report routes.
//!
//! One resource per report page:
//! - `GET /reports` lists the pages
//! - `GET /reports/{report}` runs a page with the query-string filters
//! - `GET /reports/{report}/viewer` describes its filters and defaults

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::Utc;
use serde::Serialize;
use tracing::debug;
use trialview_core::reports::{
    ReportFilters, ReportName, ReportOutput, ReportService, ReportViewerSpec,
};
use trialview_shared::AppError;

use crate::{AppState, error::ApiError};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(list_reports))
        .route("/reports/{report}", get(run_report))
        .route("/reports/{report}/viewer", get(get_viewer))
}

/// Entry of the report listing.
#[derive(Debug, Serialize)]
pub struct ReportSummaryResponse {
    /// Page title.
    pub name: &'static str,
    /// Path segment.
    pub slug: &'static str,
}

async fn list_reports() -> Json<Vec<ReportSummaryResponse>> {
    Json(
        ReportName::ALL
            .into_iter()
            .map(|name| ReportSummaryResponse {
                name: name.title(),
                slug: name.slug(),
            })
            .collect(),
    )
}

async fn run_report(
    State(state): State<AppState>,
    Path(report): Path<String>,
    Query(filters): Query<ReportFilters>,
) -> Result<Json<ReportOutput>, ApiError> {
    let name = resolve_page(&report)?;
    debug!(report = %name, ?filters, "Running report");

    let output = ReportService::execute(state.source.as_ref(), name, Some(&filters)).await?;
    Ok(Json(output))
}

async fn get_viewer(Path(report): Path<String>) -> Result<Json<ReportViewerSpec>, ApiError> {
    let name = resolve_page(&report)?;
    Ok(Json(name.viewer_spec(Utc::now().date_naive())))
}

fn resolve_page(report: &str) -> Result<ReportName, ApiError> {
    report
        .parse::<ReportName>()
        .map_err(|_| AppError::NotFound(format!("Report '{report}'")).into())
}
