//! Analytics Module
//!
//! Turns raw incident reports into a severity heatmap and predicted
//! movement paths per spatial cluster. Pure and synchronous: every call
//! recomputes from the report snapshot it is given.
//!
//! ## Structure
//! - `types`: Report, HeatPoint, Cluster, FlightPath, ...
//! - `rules`: Constants and `AnalyticsConfig`
//! - `severity`: Recency/type scoring
//! - `projection`: Lat/lon -> local km frame
//! - `dbscan`: Density clustering and silhouette metric
//! - `cluster`: Parameter search, cluster assignment, severity boost
//! - `motion`: Constant-velocity Kalman tracking per hypothesis
//! - `paths`: Extension of forecasts toward the next cluster
//! - `direction`: Compass label normalization
//! - `pipeline`: `compute_heatmap`, `compute_flight_paths`
//!
//! ## Usage
//! ```ignore
//! use crate::analytics::{compute_heatmap, AnalyticsConfig};
//!
//! let points = compute_heatmap(&reports, &AnalyticsConfig::default());
//! ```

// Allow unused - accessors kept for callers outside the pipeline
#![allow(unused)]

pub mod types;
pub mod rules;
pub mod severity;
pub mod projection;
pub mod dbscan;
pub mod cluster;
pub mod motion;
pub mod paths;
pub mod direction;
pub mod pipeline;

pub use types::{FlightPath, HeatPoint, Report};
pub use rules::AnalyticsConfig;
pub use pipeline::{compute_flight_paths, compute_heatmap};
