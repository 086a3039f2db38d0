//! Great-circle primitives on a spherical Earth.
//!
//! Every function takes the sphere radius in metres, so area, perimeter and
//! point-to-point distances stay in the same unit.

use crate::point::Vertex;

/// Mean Earth radius in metres.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// WGS84 semi-major axis in metres.
pub const WGS84_EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

/// Haversine distance between two points given in degrees.
///
/// The intermediate term is clamped to [0, 1]: round-off at coincident or
/// antipodal points would otherwise feed a negative number to `sqrt`.
pub fn great_circle_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64, radius_m: f64) -> f64 {
    let phi1 = degrees_to_radians(lat1);
    let phi2 = degrees_to_radians(lat2);
    let dlat = degrees_to_radians(lat2 - lat1);
    let dlng = degrees_to_radians(lng2 - lng1);

    let a = (dlat / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlng / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius_m * c
}

pub fn distance(from: &Vertex, to: &Vertex, radius_m: f64) -> f64 {
    great_circle_distance(from.lat, from.lng, to.lat, to.lng, radius_m)
}
