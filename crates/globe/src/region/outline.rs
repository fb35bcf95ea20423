//! Border polylines for a rendering collaborator.

use crate::proj::{project_ring, CartesianPoint};

use super::types::RegionCollection;

/// Project every ring (outer and holes) of every polygon, in collection order.
pub fn outlines(collection: &RegionCollection, radius: f64) -> Vec<Vec<CartesianPoint>> {
    collection
        .regions()
        .iter()
        .flat_map(|r| r.polygons.iter())
        .flat_map(|p| p.rings())
        .map(|ring| project_ring(ring, radius))
        .collect()
}

/// Largest vertex norm over all polylines; `None` if there are no vertices.
///
/// Used to fit the globe mesh to the drawn borders.
pub fn bounding_radius(polylines: &[Vec<CartesianPoint>]) -> Option<f64> {
    polylines
        .iter()
        .flatten()
        .map(CartesianPoint::norm)
        .fold(None, |acc, r| Some(acc.map_or(r, |m: f64| m.max(r))))
}
