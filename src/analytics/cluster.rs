//! Cluster Search & Execution
//!
//! Grid-searches DBSCAN parameters by silhouette score, applies the winner
//! and derives per-cluster groupings and boosted severities.

use super::dbscan::{dbscan, silhouette_score};
use super::rules::{BoostRules, SearchGrid};
use super::types::{Cluster, ClusterParams, Labels, PlanarPoint, ScoredParams, ScoredReport};

// ============================================================================
// SEARCH
// ============================================================================

/// Candidate parameters in evaluation order (eps outer, min_samples inner)
pub fn candidates(grid: &SearchGrid) -> Vec<ClusterParams> {
    grid.eps_values
        .iter()
        .flat_map(|&eps| {
            grid.min_samples_values
                .iter()
                .map(move |&min_samples| ClusterParams { eps, min_samples })
        })
        .collect()
}

/// Pick the candidate with the highest silhouette score.
///
/// Candidates with fewer than 2 clusters or fewer than 2 clustered points
/// are skipped. Ties keep the earlier candidate. `None` means no candidate
/// qualified and clustering should be skipped.
pub fn search_params(points: &[PlanarPoint], grid: &SearchGrid) -> Option<ScoredParams> {
    let mut best: Option<ScoredParams> = None;

    for params in candidates(grid) {
        let Some(score) = evaluate(points, params) else {
            continue;
        };
        tracing::trace!(eps = params.eps, min_samples = params.min_samples, score, "Cluster candidate");

        if best.map_or(true, |b| score > b.score) {
            best = Some(ScoredParams { params, score });
        }
    }

    best
}

/// Silhouette score of one candidate, `None` if it does not qualify
fn evaluate(points: &[PlanarPoint], params: ClusterParams) -> Option<f64> {
    let labels = dbscan(points, params);
    if labels.cluster_count() < 2 || labels.clustered_count() < 2 {
        return None;
    }

    let (clustered, ids): (Vec<PlanarPoint>, Vec<usize>) = points
        .iter()
        .zip(&labels.0)
        .filter_map(|(point, label)| label.map(|id| (*point, id)))
        .unzip();

    silhouette_score(&clustered, &ids)
}

// ============================================================================
// EXECUTION
// ============================================================================

/// Final cluster assignment with the selected parameters
pub fn assign_clusters(points: &[PlanarPoint], params: ClusterParams) -> Labels {
    dbscan(points, params)
}

/// Boost severity of clustered reports; noise keeps its raw severity
pub fn boost_severity(scored: &[ScoredReport<'_>], labels: &Labels, rules: &BoostRules) -> Vec<f64> {
    scored
        .iter()
        .enumerate()
        .map(|(i, s)| match labels.get(i) {
            Some(_) => (s.severity * rules.factor).min(rules.cap),
            None => s.severity,
        })
        .collect()
}

/// Group clustered reports by id (ascending), members ordered by time
pub fn group_clusters(scored: &[ScoredReport<'_>], labels: &Labels) -> Vec<Cluster> {
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); labels.cluster_count()];
    for (i, label) in labels.0.iter().enumerate() {
        if let Some(id) = label {
            members[*id].push(i);
        }
    }

    members
        .into_iter()
        .enumerate()
        .filter(|(_, m)| !m.is_empty())
        .map(|(id, mut m)| {
            m.sort_by_key(|&i| scored[i].report.timestamp);
            let count = m.len() as f64;
            let lat = m.iter().map(|&i| scored[i].report.lat).sum::<f64>() / count;
            let lon = m.iter().map(|&i| scored[i].report.lon).sum::<f64>() / count;
            Cluster { id, members: m, centroid: [lat, lon] }
        })
        .collect()
}
