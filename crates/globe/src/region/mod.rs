//! Named geographic regions: loading, containment queries, outlines.
//!
//! Purpose
//! - Hold a read-only `RegionCollection` parsed from a GeoJSON feature
//!   collection and answer "which region contains this (lat, lon)?".
//! - Keep load sequencing explicit (`DatasetSlot`), so a query can never race
//!   an unfinished load.
//!
//! Code cross-refs: `proj::{project, unproject}`, `pick::pick_sphere`.

mod contain;
mod load;
mod outline;
mod state;
mod types;

pub use contain::{
    find_containing, find_containing_region, polygon_contains, region_contains, ring_contains,
    RegionHit,
};
pub use load::{
    load_region_collection, load_with_report, parse_geojson_str, parse_geojson_value, FileSource,
    LoadCfg, LoadError, LoadReport, MemorySource, RegionSource,
};
pub use outline::{bounding_radius, outlines};
pub use state::{Atlas, DatasetSlot, DatasetState, StateError};
pub use types::{Polygon, Region, RegionCollection, RegionKind, Ring};
