pub mod spherical;

use serde::{Deserialize, Serialize};

pub use spherical::{
    EARTH_RADIUS_M, angular_difference, bearing, destination, distance, normalize_bearing,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Circular geofence, the shape a zone covers on the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFence {
    pub center: Coordinate,
    pub radius_m: f64,
}

impl GeoFence {
    pub fn contains(&self, point: Coordinate) -> bool {
        distance(self.center, point) <= self.radius_m
    }
}
