//! HTTP handlers

pub mod health;
pub mod heatmap;
pub mod flightpaths;
pub mod reports;

use axum::extract::FromRequest;

use crate::AppError;

/// JSON body extractor whose rejections use the `AppError` response shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
