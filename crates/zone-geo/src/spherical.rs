//! Great-circle math on a spherical Earth.
//!
//! Bearings are degrees clockwise from true north. Every bearing returned
//! from this module is normalized to `[0, 360)`.

use crate::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_009.0;

/// Point reached by travelling `distance_m` from `origin` along the great
/// circle that starts at `bearing_deg`.
pub fn destination(origin: Coordinate, distance_m: f64, bearing_deg: f64) -> Coordinate {
    let angular = distance_m / EARTH_RADIUS_M;
    let heading = bearing_deg.to_radians();
    let from_lat = origin.latitude.to_radians();
    let from_lng = origin.longitude.to_radians();

    let (sin_dist, cos_dist) = angular.sin_cos();
    let (sin_lat, cos_lat) = from_lat.sin_cos();
    let sin_to_lat = (cos_dist * sin_lat + sin_dist * cos_lat * heading.cos()).clamp(-1.0, 1.0);
    let d_lng = (sin_dist * cos_lat * heading.sin()).atan2(cos_dist - sin_lat * sin_to_lat);

    Coordinate::new(
        sin_to_lat.asin().to_degrees(),
        wrap_longitude((from_lng + d_lng).to_degrees()),
    )
}

/// Haversine distance in meters.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let hav = hav(lat_a - lat_b) + hav(d_lng) * lat_a.cos() * lat_b.cos();
    2.0 * hav.clamp(0.0, 1.0).sqrt().asin() * EARTH_RADIUS_M
}

/// Initial bearing of the great circle from `from` to `to`. Coincident
/// points yield `0.0`.
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    if from == to {
        return 0.0;
    }
    let from_lat = from.latitude.to_radians();
    let to_lat = to.latitude.to_radians();
    let d_lng = (to.longitude - from.longitude).to_radians();
    let y = d_lng.sin() * to_lat.cos();
    let x = from_lat.cos() * to_lat.sin() - from_lat.sin() * to_lat.cos() * d_lng.cos();
    normalize_bearing(y.atan2(x).to_degrees())
}

pub fn normalize_bearing(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Smallest unsigned angle between two bearings, in `[0, 180]`.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = normalize_bearing(a - b);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

fn hav(x: f64) -> f64 {
    let half = (x * 0.5).sin();
    half * half
}

fn wrap_longitude(degrees: f64) -> f64 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}
