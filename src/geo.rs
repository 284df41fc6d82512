//! Great-circle helpers on a spherical Earth.
//!
//! Everything downstream (anomaly rules, trajectory statistics, prediction)
//! agrees on these three functions, so they live in one place. Mean Earth
//! radius, no ellipsoid: Remote-ID ranges are a few kilometers at most and
//! the spherical error at that scale is far below the encoding precision.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial bearing from the first coordinate to the second, in degrees
/// normalized to [0, 360).
pub fn initial_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let x = dlon.sin() * lat2_rad.cos();
    let y = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * dlon.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}

/// Destination after travelling `distance_m` meters from `(lat, lon)` along
/// `bearing_deg`, by the spherical-triangle forward formula. Returns
/// `(latitude, longitude)` in degrees.
pub fn project_position(lat: f64, lon: f64, bearing_deg: f64, distance_m: f64) -> (f64, f64) {
    let lat_rad = lat.to_radians();
    let lon_rad = lon.to_radians();
    let bearing_rad = bearing_deg.to_radians();
    let angular = distance_m / EARTH_RADIUS_M;

    let new_lat =
        (lat_rad.sin() * angular.cos() + lat_rad.cos() * angular.sin() * bearing_rad.cos()).asin();
    let new_lon = lon_rad
        + (bearing_rad.sin() * angular.sin() * lat_rad.cos())
            .atan2(angular.cos() - lat_rad.sin() * new_lat.sin());

    (new_lat.to_degrees(), new_lon.to_degrees())
}
