//! Threat Map Backend Server
//!
//! Collects geolocated incident reports and serves the derived views.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    THREAT MAP SERVER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌─────────────────────────────────────────┐ │
//! │  │  API      │  │  Analytics (pure, per request)          │ │
//! │  │  (Axum)   │──▶  severity → clustering → Kalman paths   │ │
//! │  └─────┬─────┘  └─────────────────────────────────────────┘ │
//! │        ▼                                                    │
//! │  ┌─────────────┐                                            │
//! │  │ PostgreSQL  │  reports                                   │
//! │  └─────────────┘                                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod analytics;
mod config;
mod db;
mod models;
mod handlers;
mod error;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "threatmap_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    tracing::info!("Threat Map Server starting ({})...", config.environment);
    tracing::info!("Database: {}", config.database_url.split('@').last().unwrap_or("***"));
    if !config.is_production() {
        tracing::debug!("Analytics parameters: {:?}", config.analytics);
    }

    // Initialize database pool
    let pool = db::create_pool(&config.database_url).await
        .context("Failed to create database pool")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await
        .context("Failed to run migrations")?;

    // Build application state
    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await
        .context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/report", post(handlers::reports::create))
        .route("/heatmap", get(handlers::heatmap::get))
        .route("/flightpaths", get(handlers::flightpaths::get))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
