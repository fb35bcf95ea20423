//! Region data: rings, polygons, named regions and collections.
//!
//! Ownership is strict composition: a `Polygon` owns its rings, a `Region`
//! owns its polygons, a `RegionCollection` owns its regions.

use crate::proj::GeoPoint;

/// Ordered vertices; the first and last point may or may not coincide.
pub type Ring = Vec<GeoPoint>;

/// One outer ring plus zero or more holes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    #[inline]
    pub fn new(outer: Ring) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    #[inline]
    pub fn with_holes(outer: Ring, holes: Vec<Ring>) -> Self {
        Self { outer, holes }
    }

    /// All rings, outer first.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }
}

/// Geometry flavour the region was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionKind {
    Polygon,
    MultiPolygon,
}

/// Named area: exactly one polygon, or several for a MultiPolygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub name: String,
    pub kind: RegionKind,
    pub polygons: Vec<Polygon>,
}

impl Region {
    pub fn polygon(name: impl Into<String>, poly: Polygon) -> Self {
        Self {
            name: name.into(),
            kind: RegionKind::Polygon,
            polygons: vec![poly],
        }
    }

    pub fn multi_polygon(name: impl Into<String>, polys: Vec<Polygon>) -> Self {
        Self {
            name: name.into(),
            kind: RegionKind::MultiPolygon,
            polygons: polys,
        }
    }
}

/// Read-only set of regions in dataset order.
///
/// Invariants:
/// - Order is the load order and defines first-match-wins in `find_containing`.
/// - Never mutated after construction; share via `Arc` for concurrent queries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionCollection {
    regions: Vec<Region>,
}

impl RegionCollection {
    #[inline]
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Total vertex count over every ring (outer and holes).
    pub fn vertex_count(&self) -> usize {
        self.regions
            .iter()
            .flat_map(|r| r.polygons.iter())
            .flat_map(|p| p.rings())
            .map(|ring| ring.len())
            .sum()
    }
}

impl FromIterator<Region> for RegionCollection {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
