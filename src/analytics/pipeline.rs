//! Analytics Pipeline
//!
//! reports -> severity -> projection -> cluster search -> clustering
//!         -> heatmap
//!         -> per-cluster motion estimation -> path composition
//!
//! Both entry points are pure functions of the report snapshot.

use super::cluster::{assign_clusters, boost_severity, group_clusters, search_params};
use super::direction::normalize_direction;
use super::motion::estimate_cluster;
use super::paths::compose_paths;
use super::projection::PlanarProjector;
use super::rules::AnalyticsConfig;
use super::severity::score_reports;
use super::types::{FlightPath, HeatPoint, Labels, LatLon, PlanarPoint, Report, ScoredReport};

/// Scored and (optionally) clustered working set
struct Clustering<'a> {
    scored: Vec<ScoredReport<'a>>,
    projector: Option<PlanarProjector>,
    /// `None` when no parameter pair qualified
    labels: Option<Labels>,
}

fn cluster_reports<'a>(reports: &'a [Report], config: &AnalyticsConfig) -> Clustering<'a> {
    let scored = score_reports(reports, &config.severity);
    let projector = PlanarProjector::from_latitudes(reports.iter().map(|r| r.lat), &config.projection);

    let labels = projector.and_then(|projector| {
        let points: Vec<PlanarPoint> = reports
            .iter()
            .map(|r| projector.project(r.lat, r.lon))
            .collect();

        match search_params(&points, &config.search) {
            Some(best) => {
                let labels = assign_clusters(&points, best.params);
                tracing::debug!(
                    eps = best.params.eps,
                    min_samples = best.params.min_samples,
                    score = best.score,
                    clusters = labels.cluster_count(),
                    "Clustering parameters selected"
                );
                Some(labels)
            }
            None => {
                tracing::debug!(reports = points.len(), "No qualifying clustering parameters");
                None
            }
        }
    });

    Clustering { scored, projector, labels }
}

/// Severity heatmap over all reports, clustered reports boosted
pub fn compute_heatmap(reports: &[Report], config: &AnalyticsConfig) -> Vec<HeatPoint> {
    let clustering = cluster_reports(reports, config);

    let intensities = match &clustering.labels {
        Some(labels) => boost_severity(&clustering.scored, labels, &config.boost),
        None => clustering.scored.iter().map(|s| s.severity).collect(),
    };

    clustering
        .scored
        .iter()
        .zip(intensities)
        .map(|(scored, intensity)| heat_point(scored.report, intensity))
        .collect()
}

fn heat_point(report: &Report, intensity: f64) -> HeatPoint {
    let report_type = report.report_type.trim().to_lowercase();
    HeatPoint {
        lat: report.lat,
        lon: report.lon,
        intensity,
        direction: normalize_direction(report.direction.as_deref()),
        report_type: if report_type.is_empty() { "unknown".to_string() } else { report_type },
        timestamp: Some(report.timestamp),
        description: report.description.clone().unwrap_or_default(),
    }
}

/// Multi-hypothesis predicted paths, one entry per cluster in id order.
/// Empty when clustering is skipped.
pub fn compute_flight_paths(reports: &[Report], config: &AnalyticsConfig) -> Vec<FlightPath> {
    let clustering = cluster_reports(reports, config);
    let (Some(labels), Some(projector)) = (&clustering.labels, &clustering.projector) else {
        return Vec::new();
    };

    let clusters = group_clusters(&clustering.scored, labels);
    let centroids: Vec<LatLon> = clusters.iter().map(|c| c.centroid).collect();

    let mut paths: Vec<FlightPath> = clusters
        .iter()
        .map(|cluster| FlightPath {
            cluster_id: cluster.id,
            paths: estimate_cluster(cluster, &clustering.scored, &config.motion, &config.projection),
        })
        .collect();

    compose_paths(&mut paths, &centroids, projector, &config.paths);
    paths
}
