//! Motion Estimator
//!
//! Constant-velocity Kalman filter over a cluster's time-ordered reports.
//! State is `[x, y, vx, vy]` in km and km/s; only position is measured.
//! The filter is run once per hypothesis, varying only process noise.

use nalgebra::{Matrix2, Matrix2x4, Matrix4, Vector2, Vector4};

use super::projection::PlanarProjector;
use super::rules::{HypothesisParams, MotionRules, ProjectionRules};
use super::types::{Cluster, HypothesisPaths, PathForecast, PlanarPoint, ScoredReport};

const MS_PER_SECOND: f64 = 1000.0;

/// One position fix of the tracked entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub position: PlanarPoint,
    /// Epoch milliseconds
    pub timestamp: i64,
}

// ============================================================================
// FILTER
// ============================================================================

#[derive(Debug, Clone)]
pub struct KalmanFilter {
    state: Vector4<f64>,
    covariance: Matrix4<f64>,
    process_noise: Matrix4<f64>,
    measurement_noise: Matrix2<f64>,
}

impl KalmanFilter {
    /// Start at `initial` with zero velocity
    pub fn new(initial: PlanarPoint, rules: &MotionRules, process_noise: f64) -> Self {
        Self {
            state: Vector4::new(initial.x, initial.y, 0.0, 0.0),
            covariance: Matrix4::identity() * rules.initial_covariance,
            process_noise: Matrix4::identity() * process_noise,
            measurement_noise: Matrix2::identity() * rules.measurement_noise,
        }
    }

    /// Propagate state and covariance `dt` seconds forward
    pub fn predict(&mut self, dt: f64) {
        let f = transition(dt);
        self.state = f * self.state;
        self.covariance = f * self.covariance * f.transpose() + self.process_noise;
    }

    /// Fold in a position measurement
    pub fn update(&mut self, measured: PlanarPoint) {
        let h = observation_model();
        let z = Vector2::new(measured.x, measured.y);

        let residual = z - h * self.state;
        let s = h * self.covariance * h.transpose() + self.measurement_noise;
        let Some(s_inv) = s.try_inverse() else {
            // R is positive definite, so S can only be singular on NaN input
            tracing::warn!("Singular innovation covariance, measurement skipped");
            return;
        };
        let gain = self.covariance * h.transpose() * s_inv;

        self.state += gain * residual;
        self.covariance = (Matrix4::identity() - gain * h) * self.covariance;
    }

    pub fn position(&self) -> PlanarPoint {
        PlanarPoint::new(self.state[0], self.state[1])
    }

    /// (vx, vy) in km/s
    pub fn velocity(&self) -> (f64, f64) {
        (self.state[2], self.state[3])
    }

    pub fn covariance(&self) -> &Matrix4<f64> {
        &self.covariance
    }
}

fn transition(dt: f64) -> Matrix4<f64> {
    Matrix4::new(
        1.0, 0.0, dt, 0.0,
        0.0, 1.0, 0.0, dt,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    )
}

fn observation_model() -> Matrix2x4<f64> {
    Matrix2x4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
    )
}

// ============================================================================
// TRACKING
// ============================================================================

/// Planar history (one point per observation) and forecast
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub history: Vec<PlanarPoint>,
    pub forecast: Vec<PlanarPoint>,
}

/// Filter a time-ordered observation sequence, then extrapolate.
/// Fewer than 2 observations give an empty track.
pub fn run_filter(observations: &[Observation], rules: &MotionRules, process_noise: f64) -> Track {
    let [first, rest @ ..] = observations else {
        return Track::default();
    };
    if rest.is_empty() {
        return Track::default();
    }

    let mut filter = KalmanFilter::new(first.position, rules, process_noise);
    let mut history = Vec::with_capacity(observations.len());
    history.push(first.position);

    let mut prev_time = first.timestamp;
    for obs in rest {
        let mut dt = (obs.timestamp - prev_time) as f64 / MS_PER_SECOND;
        if dt <= 0.0 {
            dt = rules.fallback_dt_secs;
        }

        filter.predict(dt);
        filter.update(obs.position);
        history.push(filter.position());

        prev_time = obs.timestamp;
    }

    let forecast = (0..rules.forecast_steps)
        .map(|_| {
            filter.predict(rules.forecast_step_secs);
            filter.position()
        })
        .collect();

    Track { history, forecast }
}

/// Track a cluster under one hypothesis, output in lat/lon
pub fn estimate_track(
    observations: &[Observation],
    projector: &PlanarProjector,
    rules: &MotionRules,
    params: &HypothesisParams,
) -> PathForecast {
    let track = run_filter(observations, rules, params.process_noise);
    PathForecast {
        history: track.history.into_iter().map(|p| projector.unproject(p)).collect(),
        prediction: track.forecast.into_iter().map(|p| projector.unproject(p)).collect(),
        probability: params.probability,
    }
}

/// Track a cluster under every configured hypothesis.
///
/// The cluster gets its own planar frame centred on its mean latitude.
pub fn estimate_cluster(
    cluster: &Cluster,
    scored: &[ScoredReport<'_>],
    motion: &MotionRules,
    projection: &ProjectionRules,
) -> HypothesisPaths {
    let mut paths = HypothesisPaths::default();

    if cluster.members.len() < 2 {
        tracing::debug!(cluster_id = cluster.id, "Cluster too small for motion estimation");
    }

    let projector = PlanarProjector::from_latitudes(
        cluster.members.iter().map(|&i| scored[i].report.lat),
        projection,
    );
    let observations: Vec<Observation> = match projector {
        Some(projector) => cluster
            .members
            .iter()
            .map(|&i| {
                let report = scored[i].report;
                Observation {
                    position: projector.project(report.lat, report.lon),
                    timestamp: report.timestamp,
                }
            })
            .collect(),
        None => Vec::new(),
    };

    for params in &motion.hypotheses {
        *paths.get_mut(params.hypothesis) = match &projector {
            Some(projector) => estimate_track(&observations, projector, motion, params),
            None => PathForecast {
                probability: params.probability,
                ..Default::default()
            },
        };
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::types::{Hypothesis, Report};
    use uuid::Uuid;

    fn obs(x: f64, y: f64, timestamp: i64) -> Observation {
        Observation { position: PlanarPoint::new(x, y), timestamp }
    }

    fn report(lat: f64, lon: f64, timestamp: i64) -> Report {
        Report {
            id: Uuid::new_v4(),
            lat,
            lon,
            timestamp,
            report_type: "troop".to_string(),
            direction: None,
            description: None,
        }
    }

    #[test]
    fn test_two_observations_trend_forward() {
        let rules = MotionRules::default();
        let track = run_filter(&[obs(0.0, 0.0, 0), obs(1.0, 0.0, 1000)], &rules, 0.005);

        assert_eq!(track.history.len(), 2);
        assert_eq!(track.history[0], PlanarPoint::new(0.0, 0.0));
        assert!(track.history[1].x > 0.0);
        assert_eq!(track.forecast.len(), 3);

        let mut prev = track.history[1].x;
        for point in &track.forecast {
            assert!(point.x > prev);
            assert!(point.y.abs() < 1e-12);
            prev = point.x;
        }
    }

    #[test]
    fn test_insufficient_observations() {
        let rules = MotionRules::default();
        assert_eq!(run_filter(&[], &rules, 0.02), Track::default());
        assert_eq!(run_filter(&[obs(1.0, 1.0, 0)], &rules, 0.02), Track::default());
    }

    #[test]
    fn test_non_positive_dt_uses_fallback() {
        let rules = MotionRules::default();
        let duplicate = run_filter(&[obs(0.0, 0.0, 5000), obs(1.0, 0.0, 5000)], &rules, 0.02);
        let one_second = run_filter(&[obs(0.0, 0.0, 4000), obs(1.0, 0.0, 5000)], &rules, 0.02);

        assert_eq!(duplicate, one_second);
        for p in duplicate.history.iter().chain(&duplicate.forecast) {
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn test_higher_process_noise_follows_measurements_closer() {
        let rules = MotionRules::default();
        let observations = [obs(0.0, 0.0, 0), obs(0.5, 0.0, 10_000), obs(0.5, 1.0, 20_000)];

        let smooth = run_filter(&observations, &rules, 0.005);
        let agile = run_filter(&observations, &rules, 0.05);

        let target = observations[2].position;
        assert!(agile.history[2].distance(&target) < smooth.history[2].distance(&target));
    }

    #[test]
    fn test_update_shrinks_position_uncertainty() {
        let rules = MotionRules::default();
        let mut filter = KalmanFilter::new(PlanarPoint::new(0.0, 0.0), &rules, 0.02);
        filter.predict(1.0);
        let before = filter.covariance()[(0, 0)];
        filter.update(PlanarPoint::new(0.1, 0.0));
        assert!(filter.covariance()[(0, 0)] < before);
        assert!(filter.velocity().0 > 0.0);
    }

    #[test]
    fn test_single_member_cluster_is_empty_for_all_hypotheses() {
        let reports = vec![report(50.0, 30.0, 0)];
        let scored: Vec<ScoredReport> = reports
            .iter()
            .map(|report| ScoredReport { report, severity: 0.8 })
            .collect();
        let cluster = Cluster { id: 0, members: vec![0], centroid: [50.0, 30.0] };

        let paths = estimate_cluster(&cluster, &scored, &MotionRules::default(), &ProjectionRules::default());
        for (hypothesis, probability) in [(Hypothesis::High, 0.9), (Hypothesis::Medium, 0.6), (Hypothesis::Low, 0.3)] {
            let forecast = paths.get(hypothesis);
            assert!(forecast.history.is_empty());
            assert!(forecast.prediction.is_empty());
            assert_eq!(forecast.probability, probability);
        }
    }

    #[test]
    fn test_cluster_history_starts_at_first_report() {
        let reports = vec![
            report(50.4510, 30.5240, 60_000),
            report(50.4500, 30.5230, 0),
            report(50.4505, 30.5235, 30_000),
        ];
        let scored: Vec<ScoredReport> = reports
            .iter()
            .map(|report| ScoredReport { report, severity: 0.8 })
            .collect();
        let cluster = Cluster { id: 3, members: vec![1, 2, 0], centroid: [50.4505, 30.5235] };

        let paths = estimate_cluster(&cluster, &scored, &MotionRules::default(), &ProjectionRules::default());
        let high = &paths.high;
        assert_eq!(high.history.len(), 3);
        assert_eq!(high.prediction.len(), 3);
        assert!((high.history[0][0] - 50.4500).abs() < 1e-9);
        assert!((high.history[0][1] - 30.5230).abs() < 1e-9);
        // Moving north-east: forecast keeps going
        assert!(high.prediction[2][0] > high.history[2][0]);
        assert!(high.prediction[2][1] > high.history[2][1]);
    }
}
