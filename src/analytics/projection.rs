//! Planar Projector
//!
//! Local equirectangular approximation: lat/lon degrees -> kilometres.
//! Valid at city/regional scale; degrades near the poles. Coordinates are
//! only comparable between points projected with the same projector.

use super::rules::ProjectionRules;
use super::types::{LatLon, PlanarPoint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarProjector {
    lat_km_per_deg: f64,
    lon_km_per_deg: f64,
}

impl PlanarProjector {
    /// Projector centred on the mean latitude of `lats`.
    /// Returns `None` for an empty set (mean undefined).
    pub fn from_latitudes<I>(lats: I, rules: &ProjectionRules) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (sum, count) = lats
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), lat| (sum + lat, count + 1));
        if count == 0 {
            return None;
        }
        Some(Self::with_mean_latitude(sum / count as f64, rules))
    }

    pub fn with_mean_latitude(mean_lat: f64, rules: &ProjectionRules) -> Self {
        Self {
            lat_km_per_deg: rules.km_per_degree,
            lon_km_per_deg: rules.km_per_degree * mean_lat.to_radians().cos(),
        }
    }

    pub fn project(&self, lat: f64, lon: f64) -> PlanarPoint {
        PlanarPoint::new(lat * self.lat_km_per_deg, lon * self.lon_km_per_deg)
    }

    pub fn unproject(&self, point: PlanarPoint) -> LatLon {
        let lon = if self.lon_km_per_deg.abs() < f64::EPSILON {
            0.0
        } else {
            point.y / self.lon_km_per_deg
        };
        [point.x / self.lat_km_per_deg, lon]
    }
}
