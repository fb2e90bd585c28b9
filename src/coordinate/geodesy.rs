//! Distance helpers on the WGS84 sphere

use super::point::Point;

/// Mean earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Length of one degree of latitude in meters
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Great-circle distance between two points in meters
pub fn haversine_distance(a: &Point, b: &Point) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let dlat = (b.y - a.y).to_radians();
    let dlon = (b.x - a.x).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Convert a north-south distance in meters to degrees of latitude
pub fn meters_to_lat_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Convert an east-west distance in meters to degrees of longitude at `lat`
pub fn meters_to_lon_degrees(meters: f64, lat: f64) -> f64 {
    // Clamp so the poles don't divide by zero
    let cos_lat = lat.to_radians().cos().max(1e-6);
    meters / (METERS_PER_DEGREE * cos_lat)
}
