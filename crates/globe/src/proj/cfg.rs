//! Projection defaults (internal constants).
//!
//! Policy
//! - Fixed constants; callers pass an explicit radius where it matters.

/// Sphere radius used by the globe scenes.
pub const DEFAULT_RADIUS: f64 = 5.0;
/// Angular tolerance (degrees) used when comparing round-tripped coordinates.
pub const ROUND_TRIP_EPS_DEG: f64 = 1e-9;
/// Relative tolerance for "lies on the sphere" checks.
pub const ON_SPHERE_REL_EPS: f64 = 1e-12;
