//! Great-circle navigation on the spherical Earth model.
//!
//! Formulas follow the standard haversine and forward-azimuth forms
//! (movable-type.co.uk/scripts/latlong.html), with distances in kilometres and
//! bearings in degrees clockwise from North.

use intercept_core::constants::EARTH_RADIUS_KM;

use crate::angles::wrap_lon_deg;
use crate::point::GeoPoint;

/// Great-circle distance between two points (haversine form), in kilometres.
pub fn great_circle_distance_km(origin: GeoPoint, dest: GeoPoint) -> f64 {
    let lat1 = origin.lat_deg.to_radians();
    let lat2 = dest.lat_deg.to_radians();
    let delta_lat = (dest.lat_deg - origin.lat_deg).to_radians();
    let delta_lon = (dest.lon_deg - origin.lon_deg).to_radians();
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let angular_dist = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * angular_dist
}

/// Great-circle distance via n-vectors, in kilometres. Agrees with the
/// haversine form within floating-point tolerance on all inputs.
pub fn great_circle_distance_nvector_km(origin: GeoPoint, dest: GeoPoint) -> f64 {
    let v1 = origin.to_nvector();
    let v2 = dest.to_nvector();
    let angular_dist = v1.cross(v2).norm().atan2(v1.dot(v2));
    EARTH_RADIUS_KM * angular_dist
}

/// Forward azimuth from `origin` toward `dest`, degrees in `[0, 360)`.
pub fn initial_bearing_deg(origin: GeoPoint, dest: GeoPoint) -> f64 {
    let lat1 = origin.lat_deg.to_radians();
    let lat2 = dest.lat_deg.to_radians();
    let delta_lon = (dest.lon_deg - origin.lon_deg).to_radians();
    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Project the point reached from `origin` after travelling `distance_km`
/// along the great circle leaving at `bearing_deg`.
pub fn destination_point(origin: GeoPoint, distance_km: f64, bearing_deg: f64) -> GeoPoint {
    let lat1 = origin.lat_deg.to_radians();
    let lon1 = origin.lon_deg.to_radians();
    let bearing = bearing_deg.to_radians();
    let angular_dist = distance_km / EARTH_RADIUS_KM;
    let lat2 = (lat1.sin() * angular_dist.cos() + lat1.cos() * angular_dist.sin() * bearing.cos())
        .asin();
    let lon2 = lon1
        + (bearing.sin() * angular_dist.sin() * lat1.cos())
            .atan2(angular_dist.cos() - lat1.sin() * lat2.sin());
    GeoPoint {
        lat_deg: lat2.to_degrees(),
        lon_deg: wrap_lon_deg(lon2.to_degrees()),
    }
}

/// Signed perpendicular distance from `point` to the great-circle path
/// `origin`→`dest`, in kilometres: positive right of the path, negative left.
pub fn cross_track_distance_km(origin: GeoPoint, dest: GeoPoint, point: GeoPoint) -> f64 {
    let angular_dist_13 = great_circle_distance_km(origin, point) / EARTH_RADIUS_KM;
    let bearing_13 = initial_bearing_deg(origin, point).to_radians();
    let bearing_12 = initial_bearing_deg(origin, dest).to_radians();
    EARTH_RADIUS_KM * (angular_dist_13.sin() * (bearing_13 - bearing_12).sin()).asin()
}
