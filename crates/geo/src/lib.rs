//! Spherical-Earth navigation primitives shared by the trajectory solvers.
//!
//! All distances are kilometres on a sphere of radius
//! [`intercept_core::constants::EARTH_RADIUS_KM`]; angles are decimal degrees
//! unless a function name says radians. The functions are pure and total over
//! valid latitude/longitude input; callers keep coordinates in range.

pub mod angles;
pub mod point;
pub mod spherical;

pub use angles::{deg_to_rad, rad_to_deg, trig_to_compass_deg, trig_to_compass_rad, wrap_lon_deg};
pub use point::{GeoPoint, NVector};
pub use spherical::{
    cross_track_distance_km, destination_point, great_circle_distance_km,
    great_circle_distance_nvector_km, initial_bearing_deg,
};
