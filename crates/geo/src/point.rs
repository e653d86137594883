//! Geographic points and their unit-sphere vector representation.

use crate::angles::wrap_lon_deg;

/// A latitude/longitude pair in decimal degrees.
///
/// Latitude lies in `[-90, 90]` and longitude in `(-180, 180]`; construction
/// does not re-validate (the scenario boundary checks ranges on ingest).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// Project onto the unit sphere: x toward (0°N, 0°E), z toward the North
    /// Pole, right-handed.
    pub fn to_nvector(self) -> NVector {
        let lat = self.lat_deg.to_radians();
        let lon = self.lon_deg.to_radians();
        NVector {
            x: lat.cos() * lon.cos(),
            y: lat.cos() * lon.sin(),
            z: lat.sin(),
        }
    }
}

/// Unit-length surface normal (n-vector) of a point on the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl NVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    pub fn dot(self, other: NVector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    pub fn cross(self, other: NVector) -> NVector {
        NVector {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Euclidean norm.
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Recover latitude/longitude, with longitude wrapped into `(-180, 180]`.
    pub fn to_geo_point(self) -> GeoPoint {
        let equatorial = (self.x * self.x + self.y * self.y).sqrt();
        GeoPoint {
            lat_deg: self.z.atan2(equatorial).to_degrees(),
            lon_deg: wrap_lon_deg(self.y.atan2(self.x).to_degrees()),
        }
    }
}
