//! Analytics Types
//!
//! Data structures flowing through the pipeline.
//! No logic beyond small accessors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `[lat, lon]` in degrees, serialized as a two-element array
pub type LatLon = [f64; 2];

// ============================================================================
// INPUT
// ============================================================================

/// One observed incident as delivered by the report source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub lat: f64,
    pub lon: f64,
    /// Epoch milliseconds
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub report_type: String,
    pub direction: Option<String>,
    pub description: Option<String>,
}

/// A report with its derived severity
#[derive(Debug, Clone, Copy)]
pub struct ScoredReport<'a> {
    pub report: &'a Report,
    /// 0.0 - 1.0
    pub severity: f64,
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Position in the local planar frame (kilometres)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

// ============================================================================
// CLUSTERING
// ============================================================================

/// Parameters picked by the clustering search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    pub eps: f64,
    pub min_samples: usize,
}

/// Outcome of the clustering search for one candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredParams {
    pub params: ClusterParams,
    pub score: f64,
}

/// Per-point cluster assignment, `None` = noise
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Labels(pub Vec<Option<usize>>);

impl Labels {
    /// Number of distinct non-noise clusters
    pub fn cluster_count(&self) -> usize {
        self.0.iter().flatten().max().map_or(0, |max| max + 1)
    }

    pub fn clustered_count(&self) -> usize {
        self.0.iter().filter(|label| label.is_some()).count()
    }

    pub fn get(&self, index: usize) -> Option<usize> {
        self.0.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Members of one cluster, ordered by timestamp ascending
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: usize,
    /// Indices into the scored report set
    pub members: Vec<usize>,
    /// Mean lat/lon of members
    pub centroid: LatLon,
}

// ============================================================================
// OUTPUT
// ============================================================================

/// One heatmap point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lon: f64,
    /// Severity after cluster boost
    pub intensity: f64,
    pub direction: String,
    #[serde(rename = "type")]
    pub report_type: String,
    pub timestamp: Option<i64>,
    pub description: String,
}

/// Motion hypothesis (target manoeuvrability assumption)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hypothesis {
    /// Most likely path, smooth straight motion
    High,
    Medium,
    /// Least likely, sharpest manoeuvres
    Low,
}

impl Hypothesis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hypothesis::High => "high",
            Hypothesis::Medium => "medium",
            Hypothesis::Low => "low",
        }
    }
}

impl std::fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Smoothed history and forecast for one hypothesis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathForecast {
    pub history: Vec<LatLon>,
    pub prediction: Vec<LatLon>,
    pub probability: f64,
}

/// Forecasts of a cluster under every hypothesis
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HypothesisPaths {
    pub high: PathForecast,
    pub medium: PathForecast,
    pub low: PathForecast,
}

impl HypothesisPaths {
    pub fn get(&self, hypothesis: Hypothesis) -> &PathForecast {
        match hypothesis {
            Hypothesis::High => &self.high,
            Hypothesis::Medium => &self.medium,
            Hypothesis::Low => &self.low,
        }
    }

    pub fn get_mut(&mut self, hypothesis: Hypothesis) -> &mut PathForecast {
        match hypothesis {
            Hypothesis::High => &mut self.high,
            Hypothesis::Medium => &mut self.medium,
            Hypothesis::Low => &mut self.low,
        }
    }
}

/// Predicted movement of one cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPath {
    #[serde(rename = "clusterId")]
    pub cluster_id: usize,
    pub paths: HypothesisPaths,
}
