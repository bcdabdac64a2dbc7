//! Path Composer
//!
//! Extends each cluster's non-central forecasts toward the next cluster
//! (ascending id), offset sideways so the hypotheses fan out.

use super::projection::PlanarProjector;
use super::rules::PathRules;
use super::types::{FlightPath, Hypothesis, LatLon, PlanarPoint};

/// Side of the centroid line the extension point lands on.
/// `None` = no extension for this hypothesis.
pub fn lateral_side(hypothesis: Hypothesis) -> Option<f64> {
    match hypothesis {
        Hypothesis::High => None,
        Hypothesis::Medium => Some(1.0),
        Hypothesis::Low => Some(-1.0),
    }
}

/// `next` shifted along the left-hand perpendicular of `current -> next`
/// by `side * fraction * |next - current|`.
/// Coinciding centroids give `next` unchanged.
pub fn extension_point(current: PlanarPoint, next: PlanarPoint, fraction: f64, side: f64) -> PlanarPoint {
    let (dx, dy) = (next.x - current.x, next.y - current.y);
    let distance = dx.hypot(dy);
    if distance == 0.0 {
        return next;
    }

    let (perp_x, perp_y) = (-dy / distance, dx / distance);
    let offset = side * fraction * distance;
    PlanarPoint::new(next.x + perp_x * offset, next.y + perp_y * offset)
}

/// Append extension points to `paths`.
///
/// `centroids[i]` is the centroid of `paths[i]`; both are in ascending
/// cluster-id order. The last cluster has no successor and is untouched.
pub fn compose_paths(
    paths: &mut [FlightPath],
    centroids: &[LatLon],
    projector: &PlanarProjector,
    rules: &PathRules,
) {
    let planar: Vec<PlanarPoint> = centroids
        .iter()
        .map(|&[lat, lon]| projector.project(lat, lon))
        .collect();

    for (idx, entry) in paths.iter_mut().enumerate() {
        let (Some(&current), Some(&next)) = (planar.get(idx), planar.get(idx + 1)) else {
            break;
        };

        for hypothesis in [Hypothesis::High, Hypothesis::Medium, Hypothesis::Low] {
            let Some(side) = lateral_side(hypothesis) else {
                continue;
            };
            let target = extension_point(current, next, rules.lateral_offset_fraction, side);
            entry
                .paths
                .get_mut(hypothesis)
                .prediction
                .push(projector.unproject(target));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::rules::ProjectionRules;
    use crate::analytics::types::HypothesisPaths;

    fn entry(cluster_id: usize) -> FlightPath {
        FlightPath { cluster_id, paths: HypothesisPaths::default() }
    }

    #[test]
    fn test_extension_point_offsets() {
        let current = PlanarPoint::new(0.0, 0.0);
        let next = PlanarPoint::new(10.0, 0.0);

        let medium = extension_point(current, next, 0.05, 1.0);
        let low = extension_point(current, next, 0.05, -1.0);

        assert!((medium.x - 10.0).abs() < 1e-12);
        assert!((medium.y - 0.5).abs() < 1e-12);
        assert!((low.x - 10.0).abs() < 1e-12);
        assert!((low.y + 0.5).abs() < 1e-12);
        assert!((medium.distance(&next) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_centroids_collapse() {
        let p = PlanarPoint::new(3.0, 4.0);
        assert_eq!(extension_point(p, p, 0.05, 1.0), p);
        assert_eq!(extension_point(p, p, 0.05, -1.0), p);
    }

    #[test]
    fn test_high_has_no_extension() {
        assert_eq!(lateral_side(Hypothesis::High), None);
    }

    #[test]
    fn test_compose_extends_all_but_last() {
        let projector = PlanarProjector::with_mean_latitude(0.0, &ProjectionRules::default());
        // 10 km apart along latitude at the equator
        let centroids = [[0.0, 0.0], [10.0 / 111.0, 0.0], [20.0 / 111.0, 0.0]];
        let mut paths = vec![entry(0), entry(1), entry(2)];

        compose_paths(&mut paths, &centroids, &projector, &PathRules::default());

        for path in &paths[..2] {
            assert!(path.paths.high.prediction.is_empty());
            assert_eq!(path.paths.medium.prediction.len(), 1);
            assert_eq!(path.paths.low.prediction.len(), 1);
        }
        assert_eq!(paths[2].paths, HypothesisPaths::default());

        let [lat, lon] = paths[0].paths.medium.prediction[0];
        let point = projector.project(lat, lon);
        assert!((point.x - 10.0).abs() < 1e-9);
        assert!((point.y.abs() - 0.5).abs() < 1e-9);

        let [low_lat, low_lon] = paths[0].paths.low.prediction[0];
        let low_point = projector.project(low_lat, low_lon);
        assert!((low_point.y + point.y).abs() < 1e-9);
    }
}
