//! Density Clustering
//!
//! DBSCAN over planar points plus the silhouette cohesion metric used to
//! rank parameter choices.
//!
//! Semantics:
//! - neighbourhood = all points within `eps` (inclusive), the point itself included
//! - core point = neighbourhood size >= `min_samples`
//! - clusters are numbered 0.. in order of their first core point
//! - a border point belongs to the first cluster that reaches it

use super::types::{ClusterParams, Labels, PlanarPoint};

/// Assign every point a cluster id or noise
pub fn dbscan(points: &[PlanarPoint], params: ClusterParams) -> Labels {
    let neighborhoods: Vec<Vec<usize>> = (0..points.len())
        .map(|i| region_query(points, i, params.eps))
        .collect();
    let is_core: Vec<bool> = neighborhoods
        .iter()
        .map(|n| n.len() >= params.min_samples)
        .collect();

    let mut labels: Vec<Option<usize>> = vec![None; points.len()];
    let mut next_label = 0usize;
    let mut stack = Vec::new();

    for seed in 0..points.len() {
        if labels[seed].is_some() || !is_core[seed] {
            continue;
        }

        stack.push(seed);
        while let Some(i) = stack.pop() {
            if labels[i].is_some() {
                continue;
            }
            labels[i] = Some(next_label);
            if is_core[i] {
                stack.extend(neighborhoods[i].iter().copied().filter(|&j| labels[j].is_none()));
            }
        }
        next_label += 1;
    }

    Labels(labels)
}

fn region_query(points: &[PlanarPoint], index: usize, eps: f64) -> Vec<usize> {
    let center = &points[index];
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| center.distance(p) <= eps)
        .map(|(i, _)| i)
        .collect()
}

/// Mean silhouette coefficient of a labelled point set.
///
/// `labels[i]` is the cluster of `points[i]`; noise must be filtered out by
/// the caller. Returns `None` when fewer than 2 points or fewer than 2
/// distinct clusters are given. Singleton clusters contribute 0.
pub fn silhouette_score(points: &[PlanarPoint], labels: &[usize]) -> Option<f64> {
    if points.len() < 2 || points.len() != labels.len() {
        return None;
    }
    let cluster_count = labels.iter().max().map_or(0, |max| max + 1);
    let mut sizes = vec![0usize; cluster_count];
    for &label in labels {
        sizes[label] += 1;
    }
    if sizes.iter().filter(|&&size| size > 0).count() < 2 {
        return None;
    }

    let mut total = 0.0;
    let mut distance_sums = vec![0.0; cluster_count];
    for (i, point) in points.iter().enumerate() {
        let own = labels[i];
        if sizes[own] == 1 {
            continue;
        }

        distance_sums.iter_mut().for_each(|sum| *sum = 0.0);
        for (j, other) in points.iter().enumerate() {
            if i != j {
                distance_sums[labels[j]] += point.distance(other);
            }
        }

        let intra = distance_sums[own] / (sizes[own] - 1) as f64;
        let nearest = (0..cluster_count)
            .filter(|&c| c != own && sizes[c] > 0)
            .map(|c| distance_sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = intra.max(nearest);
        if denom > 0.0 {
            total += (nearest - intra) / denom;
        }
    }

    Some(total / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<PlanarPoint> {
        coords.iter().map(|&(x, y)| PlanarPoint::new(x, y)).collect()
    }

    #[test]
    fn test_two_dense_groups_and_noise() {
        let points = pts(&[
            (0.0, 0.0), (0.01, 0.0), (0.0, 0.01),
            (5.0, 5.0), (5.01, 5.0), (5.0, 5.01),
            (20.0, 20.0),
        ]);
        let labels = dbscan(&points, ClusterParams { eps: 0.05, min_samples: 3 });

        assert_eq!(labels.0, vec![Some(0), Some(0), Some(0), Some(1), Some(1), Some(1), None]);
        assert_eq!(labels.cluster_count(), 2);
        assert_eq!(labels.clustered_count(), 6);
    }

    #[test]
    fn test_min_samples_counts_the_point_itself() {
        let points = pts(&[(0.0, 0.0), (0.04, 0.0)]);
        let pair = dbscan(&points, ClusterParams { eps: 0.05, min_samples: 2 });
        assert_eq!(pair.0, vec![Some(0), Some(0)]);

        let none = dbscan(&points, ClusterParams { eps: 0.05, min_samples: 3 });
        assert_eq!(none.0, vec![None, None]);
    }

    #[test]
    fn test_eps_is_inclusive() {
        let points = pts(&[(0.0, 0.0), (0.25, 0.0)]);
        let labels = dbscan(&points, ClusterParams { eps: 0.25, min_samples: 2 });
        assert_eq!(labels.cluster_count(), 1);
    }

    #[test]
    fn test_border_point_joins_cluster() {
        // Chain: a core trio plus a border point reachable only from the last core
        let points = pts(&[(0.0, 0.0), (0.1, 0.0), (0.2, 0.0), (0.3, 0.0)]);
        let labels = dbscan(&points, ClusterParams { eps: 0.1, min_samples: 3 });

        // Points 1 and 2 are core, 0 and 3 are border
        assert_eq!(labels.0, vec![Some(0), Some(0), Some(0), Some(0)]);
    }

    #[test]
    fn test_empty_input() {
        let labels = dbscan(&[], ClusterParams { eps: 0.1, min_samples: 2 });
        assert_eq!(labels.len(), 0);
        assert_eq!(labels.cluster_count(), 0);
    }

    #[test]
    fn test_silhouette_well_separated_is_near_one() {
        let points = pts(&[(0.0, 0.0), (0.0, 0.1), (10.0, 0.0), (10.0, 0.1)]);
        let score = silhouette_score(&points, &[0, 0, 1, 1]).unwrap();
        assert!(score > 0.98);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_silhouette_known_value() {
        // Point 0: a = 1, b = 4. Point 1: a = 1, b = 3. Point 2 is a singleton.
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (4.0, 0.0)]);
        let score = silhouette_score(&points, &[0, 0, 1]).unwrap();

        let s0 = (4.0 - 1.0) / 4.0;
        let s1 = (3.0 - 1.0) / 3.0;
        let expected = (s0 + s1 + 0.0) / 3.0;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_silhouette_requires_two_clusters() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(silhouette_score(&points, &[0, 0]).is_none());
        assert!(silhouette_score(&points[..1], &[0]).is_none());
    }
}
