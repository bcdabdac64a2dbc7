//! Heatmap handler

use axum::{extract::State, Json};

use crate::{AppState, AppResult};
use crate::analytics::{compute_heatmap, HeatPoint};
use crate::models::ReportRecord;

/// Severity heatmap over every stored report
pub async fn get(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<HeatPoint>>> {
    let reports = ReportRecord::snapshot(&state.pool).await?;
    let analytics = state.config.analytics.clone();

    let points = tokio::task::spawn_blocking(move || compute_heatmap(&reports, &analytics)).await?;

    tracing::debug!("Heatmap built with {} points", points.len());
    Ok(Json(points))
}
