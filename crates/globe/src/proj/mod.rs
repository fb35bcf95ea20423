//! Geographic ↔ Cartesian projection on a sphere of fixed radius.
//!
//! Purpose
//! - Map `(lat, lon)` in degrees onto the surface of a sphere centred at the
//!   origin, and recover geography from a Cartesian point.
//! - Axis convention: `+y` is the north pole, `(lat 0, lon 0)` lies on `+z`,
//!   `(lat 0, lon 90)` lies on `+x`.
//!
//! Indeterminacy
//! - At the poles `x` and `z` are zero up to rounding, so the recovered
//!   longitude comes from residuals (or is 0 for an exact axis point). Only
//!   `|lat| < 90` round-trips are guaranteed.

pub mod cfg;
mod types;

pub use types::{CartesianPoint, GeoError, GeoPoint};

/// Forward projection onto the sphere of radius `radius`.
///
/// No validation: `|lat| > 90` or a negative radius still yields a finite,
/// geometrically degenerate point.
#[inline]
pub fn project(geo: GeoPoint, radius: f64) -> CartesianPoint {
    let lat = geo.lat.to_radians();
    let lon = geo.lon.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    CartesianPoint::new(
        radius * cos_lat * sin_lon,
        radius * sin_lat,
        radius * cos_lat * cos_lon,
    )
}

/// Inverse projection; the radius is recovered from the point itself.
///
/// Errors with `GeoError::DegenerateInput` only if every component is zero.
/// The point is rescaled by its largest component first, so tiny and huge
/// finite points neither underflow to the origin nor overflow to ∞.
pub fn unproject(p: CartesianPoint) -> Result<GeoPoint, GeoError> {
    let v = p.to_vector();
    if !v.iter().all(|c| c.is_finite()) {
        return Err(GeoError::NonFinite);
    }
    let scale = v.amax();
    if scale == 0.0 {
        return Err(GeoError::DegenerateInput);
    }
    let u = v / scale;
    // clamp guards |y/r| drifting past 1 by an ulp
    let lat = (u.y / u.norm()).clamp(-1.0, 1.0).asin();
    let lon = p.x.atan2(p.z);
    Ok(GeoPoint::new(lat.to_degrees(), lon.to_degrees()))
}

/// Project every vertex of a ring, preserving order.
pub fn project_ring(ring: &[GeoPoint], radius: f64) -> Vec<CartesianPoint> {
    ring.iter().map(|&g| project(g, radius)).collect()
}
