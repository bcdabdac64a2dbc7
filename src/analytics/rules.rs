//! Analytics Rules & Parameters
//!
//! Fixed weights, thresholds and estimator parameters for the analytics
//! pipeline. No logic here - only constants and the `AnalyticsConfig`
//! structure that carries them into each component.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::Hypothesis;

// ============================================================================
// SEVERITY
// ============================================================================

/// Age thresholds (minutes) and the time factor applied below each one
pub const TIME_STEPS: [(f64, f64); 3] = [(10.0, 1.0), (30.0, 0.7), (60.0, 0.5)];

/// Time factor for reports older than the last threshold
pub const STALE_TIME_FACTOR: f64 = 0.3;

/// Per-type weights (keys are lower-case)
pub const TYPE_WEIGHTS: [(&str, f64); 4] = [
    ("explosion", 1.0),
    ("drone", 0.90),
    ("troop", 0.80),
    ("other", 0.60),
];

/// Weight for any type not in `TYPE_WEIGHTS`
pub const UNKNOWN_TYPE_WEIGHT: f64 = 0.5;

// ============================================================================
// PROJECTION
// ============================================================================

/// Kilometres per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.0;

// ============================================================================
// CLUSTER SEARCH
// ============================================================================

/// Neighbourhood radii tried by the search (projected km)
pub const EPS_VALUES: [f64; 5] = [0.05, 0.10, 0.15, 0.20, 0.25];

/// Minimum neighbourhood sizes tried by the search (point itself included)
pub const MIN_SAMPLES_VALUES: [usize; 4] = [2, 3, 4, 5];

/// Severity multiplier for clustered reports
pub const CLUSTER_BOOST: f64 = 1.2;

/// Upper bound of boosted severity
pub const SEVERITY_CAP: f64 = 1.0;

// ============================================================================
// MOTION ESTIMATION
// ============================================================================

pub const INITIAL_COVARIANCE: f64 = 1.0;
pub const MEASUREMENT_NOISE: f64 = 0.05;
pub const FORECAST_STEPS: usize = 3;
pub const FORECAST_STEP_SECS: f64 = 10.0;

/// Substituted for non-positive time deltas between observations
pub const FALLBACK_DT_SECS: f64 = 1.0;

/// (hypothesis, process noise factor, prior probability)
pub const HYPOTHESES: [(Hypothesis, f64, f64); 3] = [
    (Hypothesis::High, 0.005, 0.90),
    (Hypothesis::Medium, 0.02, 0.60),
    (Hypothesis::Low, 0.05, 0.30),
];

// ============================================================================
// PATH COMPOSITION
// ============================================================================

/// Lateral offset of the extension point, as a fraction of centroid distance
pub const LATERAL_OFFSET_FRACTION: f64 = 0.05;

// ============================================================================
// CONFIGURABLE PARAMETERS
// ============================================================================

/// One step of the recency step function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeStep {
    /// Reports strictly younger than this get `factor`
    pub max_age_minutes: f64,
    pub factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityRules {
    /// Ascending by `max_age_minutes`
    pub time_steps: Vec<TimeStep>,
    pub stale_time_factor: f64,
    /// Lower-case type name -> weight
    pub type_weights: BTreeMap<String, f64>,
    pub unknown_type_weight: f64,
}

impl Default for SeverityRules {
    fn default() -> Self {
        Self {
            time_steps: TIME_STEPS
                .iter()
                .map(|&(max_age_minutes, factor)| TimeStep { max_age_minutes, factor })
                .collect(),
            stale_time_factor: STALE_TIME_FACTOR,
            type_weights: TYPE_WEIGHTS
                .iter()
                .map(|&(name, weight)| (name.to_string(), weight))
                .collect(),
            unknown_type_weight: UNKNOWN_TYPE_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionRules {
    pub km_per_degree: f64,
}

impl Default for ProjectionRules {
    fn default() -> Self {
        Self { km_per_degree: KM_PER_DEGREE }
    }
}

/// Candidate grid for the clustering search.
/// Iteration order is eps outer, min_samples inner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchGrid {
    pub eps_values: Vec<f64>,
    pub min_samples_values: Vec<usize>,
}

impl Default for SearchGrid {
    fn default() -> Self {
        Self {
            eps_values: EPS_VALUES.to_vec(),
            min_samples_values: MIN_SAMPLES_VALUES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostRules {
    pub factor: f64,
    pub cap: f64,
}

impl Default for BoostRules {
    fn default() -> Self {
        Self {
            factor: CLUSTER_BOOST,
            cap: SEVERITY_CAP,
        }
    }
}

/// Estimator configuration of one path hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HypothesisParams {
    pub hypothesis: Hypothesis,
    pub process_noise: f64,
    pub probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionRules {
    pub initial_covariance: f64,
    pub measurement_noise: f64,
    pub forecast_steps: usize,
    pub forecast_step_secs: f64,
    pub fallback_dt_secs: f64,
    pub hypotheses: Vec<HypothesisParams>,
}

impl Default for MotionRules {
    fn default() -> Self {
        Self {
            initial_covariance: INITIAL_COVARIANCE,
            measurement_noise: MEASUREMENT_NOISE,
            forecast_steps: FORECAST_STEPS,
            forecast_step_secs: FORECAST_STEP_SECS,
            fallback_dt_secs: FALLBACK_DT_SECS,
            hypotheses: HYPOTHESES
                .iter()
                .map(|&(hypothesis, process_noise, probability)| HypothesisParams {
                    hypothesis,
                    process_noise,
                    probability,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathRules {
    pub lateral_offset_fraction: f64,
}

impl Default for PathRules {
    fn default() -> Self {
        Self { lateral_offset_fraction: LATERAL_OFFSET_FRACTION }
    }
}

/// Full parameter set of the analytics pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub severity: SeverityRules,
    pub projection: ProjectionRules,
    pub search: SearchGrid,
    pub boost: BoostRules,
    pub motion: MotionRules,
    pub paths: PathRules,
}
