//! Flight path handler

use axum::{extract::State, Json};

use crate::{AppState, AppResult};
use crate::analytics::{compute_flight_paths, FlightPath};
use crate::models::ReportRecord;

/// Predicted movement paths per report cluster
pub async fn get(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FlightPath>>> {
    let reports = ReportRecord::snapshot(&state.pool).await?;
    let analytics = state.config.analytics.clone();

    let paths = tokio::task::spawn_blocking(move || compute_flight_paths(&reports, &analytics)).await?;

    tracing::debug!("Flight paths built for {} clusters", paths.len());
    Ok(Json(paths))
}
