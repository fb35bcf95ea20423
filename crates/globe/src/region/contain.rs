//! Even-odd ray casting in the (lon, lat) plane.
//!
//! The test is planar and independent of the sphere projection: longitude is
//! the x axis, latitude the y axis, and the ray runs toward `+x`.
//!
//! Known gap
//! - Only outer rings are consulted. A point inside a hole is reported as
//!   contained by the surrounding polygon.

use crate::proj::GeoPoint;

use super::types::{Polygon, Region, RegionCollection};

/// First hit of a containment query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionHit<'a> {
    /// Index into `RegionCollection::regions()`.
    pub region_index: usize,
    /// Index into `Region::polygons` (always 0 for a plain Polygon).
    pub polygon_index: usize,
    pub region: &'a Region,
    pub polygon: &'a Polygon,
}

impl<'a> RegionHit<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        &self.region.name
    }
}

/// Even-odd test against a single ring. Rings with < 3 vertices contain nothing.
///
/// An edge `(v[j], v[i])` toggles the state iff exactly one endpoint is strictly
/// above `q.lat` and the edge crosses `q.lat` strictly east of `q.lon`. Points on
/// an edge therefore follow this rule literally (stable, not "geometrically
/// correct").
pub fn ring_contains(ring: &[GeoPoint], q: GeoPoint) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (ring[i].lon, ring[i].lat);
        let (xj, yj) = (ring[j].lon, ring[j].lat);
        // straddle check first: guarantees yj != yi below
        if (yi > q.lat) != (yj > q.lat) && q.lon < (xj - xi) * (q.lat - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Outer-ring containment (holes ignored).
#[inline]
pub fn polygon_contains(poly: &Polygon, q: GeoPoint) -> bool {
    ring_contains(&poly.outer, q)
}

/// First polygon of `region` containing `q`.
pub fn region_contains(region: &Region, q: GeoPoint) -> Option<usize> {
    region
        .polygons
        .iter()
        .position(|poly| polygon_contains(poly, q))
}

/// First region (collection order) with a polygon containing `q`.
pub fn find_containing(collection: &RegionCollection, q: GeoPoint) -> Option<RegionHit<'_>> {
    collection
        .regions()
        .iter()
        .enumerate()
        .find_map(|(region_index, region)| {
            region_contains(region, q).map(|polygon_index| RegionHit {
                region_index,
                polygon_index,
                region,
                polygon: &region.polygons[polygon_index],
            })
        })
}

/// Name of the first region containing `q`, or `None`.
#[inline]
pub fn find_containing_region(collection: &RegionCollection, q: GeoPoint) -> Option<&str> {
    find_containing(collection, q).map(|hit| hit.name())
}
