//! Curated surface for the CLI and bindings (UNSTABLE).
//!
//! Prefer these re-exports over reaching into submodules, so call sites stay
//! stable while the module layout moves.

// Projection
pub use crate::proj::cfg::DEFAULT_RADIUS;
pub use crate::proj::{project, project_ring, unproject, CartesianPoint, GeoError, GeoPoint};
// Regions
pub use crate::region::{
    bounding_radius, find_containing, find_containing_region, load_region_collection,
    load_with_report, outlines, parse_geojson_str, Atlas, DatasetSlot, DatasetState, FileSource,
    LoadCfg, LoadError, LoadReport, MemorySource, Polygon, Region, RegionCollection, RegionHit,
    RegionKind, RegionSource,
};
// Picking
pub use crate::pick::{pick_geo, pick_region, pick_sphere, ray_sphere_t, Ray};
