//! Ray ↔ sphere picking for pointer interaction.
//!
//! A pointer ray (already unprojected from screen space by the caller) is
//! intersected with the globe, a sphere of radius `R` centred at the origin.
//! The hit point composes with `proj::unproject` and
//! `region::find_containing_region` to resolve a click to a region name.

use nalgebra::Vector3;

use crate::proj::{unproject, CartesianPoint, GeoError, GeoPoint};
use crate::region::{find_containing_region, RegionCollection};

/// Half-line `origin + t·dir`, `t ≥ 0`. `dir` need not be normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3<f64>,
    pub dir: Vector3<f64>,
}

impl Ray {
    #[inline]
    pub fn new(origin: Vector3<f64>, dir: Vector3<f64>) -> Self {
        Self { origin, dir }
    }

    #[inline]
    pub fn at(&self, t: f64) -> Vector3<f64> {
        self.origin + self.dir * t
    }
}

/// Smallest non-negative ray parameter hitting the sphere, if any.
///
/// Solves `|o + t d|² = R²`. An origin inside the sphere yields the exit point.
pub fn ray_sphere_t(ray: &Ray, radius: f64) -> Option<f64> {
    let a = ray.dir.norm_squared();
    if !a.is_finite() || a <= 0.0 || radius <= 0.0 {
        return None;
    }
    let b = ray.origin.dot(&ray.dir);
    let c = ray.origin.norm_squared() - radius * radius;
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let s = disc.sqrt();
    let t_near = (-b - s) / a;
    let t_far = (-b + s) / a;
    if t_near >= 0.0 {
        Some(t_near)
    } else if t_far >= 0.0 {
        Some(t_far)
    } else {
        None
    }
}

/// First intersection of `ray` with the sphere of radius `radius`.
pub fn pick_sphere(ray: &Ray, radius: f64) -> Option<CartesianPoint> {
    ray_sphere_t(ray, radius).map(|t| CartesianPoint::from(ray.at(t)))
}

/// Geographic coordinate under the pointer; `Ok(None)` when the ray misses.
///
/// A hit that cannot be unprojected (a sphere so small the hit rounds to the
/// origin) is returned as the `unproject` error.
pub fn pick_geo(ray: &Ray, radius: f64) -> Result<Option<GeoPoint>, GeoError> {
    pick_sphere(ray, radius).map(unproject).transpose()
}

/// Region name under the pointer: ray → sphere → (lat, lon) → containment.
pub fn pick_region<'a>(
    ray: &Ray,
    radius: f64,
    collection: &'a RegionCollection,
) -> Result<Option<&'a str>, GeoError> {
    Ok(pick_geo(ray, radius)?.and_then(|q| find_containing_region(collection, q)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::project;
    use crate::region::{parse_geojson_str, LoadCfg};
    use nalgebra::vector;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn head_on_hit_is_near_side() {
        let ray = Ray::new(vector![0.0, 0.0, 20.0], vector![0.0, 0.0, -1.0]);
        let p = pick_sphere(&ray, 5.0).unwrap();
        assert!((p.z - 5.0).abs() < 1e-12 && p.x.abs() < 1e-12 && p.y.abs() < 1e-12);
        let g = pick_geo(&ray, 5.0).unwrap().unwrap();
        assert!(g.lat.abs() < 1e-12 && g.lon.abs() < 1e-12);
    }

    #[test]
    fn misses_and_degenerate_rays() {
        // Passes above the sphere.
        let ray = Ray::new(vector![0.0, 6.0, 20.0], vector![0.0, 0.0, -1.0]);
        assert!(pick_sphere(&ray, 5.0).is_none());
        // Points away.
        let away = Ray::new(vector![0.0, 0.0, 20.0], vector![0.0, 0.0, 1.0]);
        assert!(pick_sphere(&away, 5.0).is_none());
        // Zero direction.
        let zero = Ray::new(vector![0.0, 0.0, 20.0], Vector3::zeros());
        assert!(pick_sphere(&zero, 5.0).is_none());
    }

    #[test]
    fn unprojectable_hit_surfaces_error() {
        // Sphere of subnormal radius: the exit point rounds to the origin.
        let ray = Ray::new(Vector3::zeros(), vector![1.0, 0.0, 0.0]);
        let radius = f64::from_bits(1);
        assert!(pick_sphere(&ray, radius).is_some());
        assert_eq!(pick_geo(&ray, radius), Err(GeoError::DegenerateInput));
        // A miss is not an error.
        let away = Ray::new(vector![0.0, 0.0, 20.0], vector![0.0, 0.0, 1.0]);
        assert_eq!(pick_geo(&away, 5.0), Ok(None));
    }

    #[test]
    fn origin_inside_returns_exit_point() {
        let ray = Ray::new(Vector3::zeros(), vector![1.0, 0.0, 0.0]);
        let p = pick_sphere(&ray, 2.0).unwrap();
        assert!((p.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn unnormalized_direction() {
        let ray = Ray::new(vector![0.0, 0.0, 20.0], vector![0.0, 0.0, -7.5]);
        let t = ray_sphere_t(&ray, 5.0).unwrap();
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn rays_toward_surface_points_recover_geography() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let g = GeoPoint::new(rng.gen_range(-80.0..80.0), rng.gen_range(-179.0..179.0));
            let target = project(g, 5.0).to_vector();
            // Camera on the outward normal, looking at the target.
            let origin = target * 4.0;
            let ray = Ray::new(origin, target - origin);
            let back = pick_geo(&ray, 5.0).unwrap().unwrap();
            assert!((back.lat - g.lat).abs() < 1e-9);
            assert!((back.lon - g.lon).abs() < 1e-9);
        }
    }

    #[test]
    fn pick_region_resolves_click() {
        let payload = include_str!("../data/regions.geojson");
        let c = parse_geojson_str(payload, &LoadCfg::default())
            .unwrap()
            .collection;
        let target = project(GeoPoint::new(25.0, 25.0), 5.0).to_vector();
        let ray = Ray::new(target * 3.0, -target);
        assert_eq!(pick_region(&ray, 5.0, &c), Ok(Some("Islands")));
        let sky = Ray::new(vector![0.0, 0.0, 20.0], vector![1.0, 0.0, 0.0]);
        assert_eq!(pick_region(&sky, 5.0, &c), Ok(None));
    }
}
