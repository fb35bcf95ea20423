//! Point types for both sides of the projection.

use std::fmt;

use nalgebra::Vector3;

use super::cfg::ON_SPHERE_REL_EPS;

/// Geographic coordinate in degrees.
///
/// Invariants:
/// - Intended ranges are `lat ∈ [-90, 90]`, `lon ∈ [-180, 180]`; `new` does not
///   enforce them. Use `try_new` at input boundaries to reject NaN/∞.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Checked constructor for untrusted input.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        let g = Self { lat, lon };
        if g.is_finite() {
            Ok(g)
        } else {
            Err(GeoError::NonFinite)
        }
    }

    /// GeoJSON position order `[lon, lat]`.
    #[inline]
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lon }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Point in R³; produced by `project` on a sphere of known radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPoint {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Euclidean distance from the origin, without intermediate over/underflow.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// True if `|p| ≈ radius` within a relative tolerance.
    pub fn is_on_sphere(&self, radius: f64) -> bool {
        (self.norm() - radius).abs() <= ON_SPHERE_REL_EPS * radius.abs()
    }
}

impl From<Vector3<f64>> for CartesianPoint {
    #[inline]
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<CartesianPoint> for Vector3<f64> {
    #[inline]
    fn from(p: CartesianPoint) -> Self {
        p.to_vector()
    }
}

/// Errors surfaced by the projector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeoError {
    /// Zero-length Cartesian point: latitude/longitude cannot be recovered.
    DegenerateInput,
    /// NaN or infinite coordinate.
    NonFinite,
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::DegenerateInput => {
                write!(f, "point at the origin has no latitude/longitude")
            }
            GeoError::NonFinite => write!(f, "coordinate is NaN or infinite"),
        }
    }
}

impl std::error::Error for GeoError {}
