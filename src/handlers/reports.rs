//! Report submission handler

use axum::{extract::State, Json};
use validator::Validate;

use super::AppJson;

use crate::{AppState, AppResult};
use crate::models::{ReportRecord, CreateReport, CreateReportResponse};

/// Store a new incident report
pub async fn create(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateReport>,
) -> AppResult<Json<CreateReportResponse>> {
    req.validate()?;

    let report = ReportRecord::create(&state.pool, req).await?;

    tracing::info!("Report stored: {} ({})", report.report_type, report.id);

    Ok(Json(CreateReportResponse {
        status: "ok",
        id: report.id,
    }))
}
