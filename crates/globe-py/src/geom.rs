//! Projection and picking bindings.

use crate::common::map_geo_err;
use globe::api::{pick_geo, project, unproject, CartesianPoint, GeoPoint, Ray};
use nalgebra::Vector3;
use pyo3::prelude::*;

/// (lat, lon) in degrees → (x, y, z) on the sphere of `radius`.
#[pyfunction]
#[pyo3(signature = (lat, lon, radius = globe::api::DEFAULT_RADIUS))]
pub fn project_point(lat: f64, lon: f64, radius: f64) -> (f64, f64, f64) {
    let p = project(GeoPoint::new(lat, lon), radius);
    (p.x, p.y, p.z)
}

/// (x, y, z) → (lat, lon); raises ValueError at the origin.
#[pyfunction]
pub fn unproject_point(x: f64, y: f64, z: f64) -> PyResult<(f64, f64)> {
    let g = unproject(CartesianPoint::new(x, y, z)).map_err(map_geo_err)?;
    Ok((g.lat, g.lon))
}

/// Ray/sphere pick returning (lat, lon), or None on a miss.
#[pyfunction]
pub fn pick(
    origin: (f64, f64, f64),
    dir: (f64, f64, f64),
    radius: f64,
) -> PyResult<Option<(f64, f64)>> {
    let ray = Ray::new(
        Vector3::new(origin.0, origin.1, origin.2),
        Vector3::new(dir.0, dir.1, dir.2),
    );
    let hit = pick_geo(&ray, radius).map_err(map_geo_err)?;
    Ok(hit.map(|g| (g.lat, g.lon)))
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(project_point, m)?)?;
    m.add_function(wrap_pyfunction!(unproject_point, m)?)?;
    m.add_function(wrap_pyfunction!(pick, m)?)?;
    Ok(())
}
