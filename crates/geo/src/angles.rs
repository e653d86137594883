//! Angle conversions between trigonometric and compass conventions.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Convert an angle in degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Convert an angle in radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Convert a trigonometric angle (counterclockwise from East, degrees) into a
/// compass bearing (clockwise from North), normalized into `[0, 360)`.
#[inline]
pub fn trig_to_compass_deg(trig_angle_deg: f64) -> f64 {
    (90.0 - trig_angle_deg).rem_euclid(360.0)
}

/// Convert a trigonometric angle (counterclockwise from East, radians) into a
/// compass bearing (clockwise from North), normalized into `[0, 2π)`.
#[inline]
pub fn trig_to_compass_rad(trig_angle_rad: f64) -> f64 {
    (FRAC_PI_2 - trig_angle_rad).rem_euclid(TAU)
}

/// Wrap a longitude in degrees back into `(-180, 180]`.
pub fn wrap_lon_deg(lon_deg: f64) -> f64 {
    let wrapped = (lon_deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}
