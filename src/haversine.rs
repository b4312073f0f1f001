//! Haversine distance calculator (the canonical distance function).
//!
//! Great-circle distance on a sphere, with coordinates in degrees.
//! Ignores roads, so it underestimates real driving distance.

use crate::order::GeoLocation;
use crate::traits::DistanceCalculator;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two lat/lon points.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineDistance;

impl HaversineDistance {
    pub fn new() -> Self {
        Self
    }
}

impl DistanceCalculator for HaversineDistance {
    fn distance(&self, from: GeoLocation, to: GeoLocation) -> f64 {
        let lat1 = from.lat.to_radians();
        let lat2 = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lon = (to.lon - from.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}
