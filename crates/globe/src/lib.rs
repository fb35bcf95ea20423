//! Globe geometry: projection between (lat, lon) and points on a sphere, and
//! region lookup by point-in-polygon.
//!
//! Layout
//! - `proj`: forward/inverse projection, radius constants.
//! - `region`: GeoJSON regions, containment queries, load state, outlines.
//! - `pick`: pointer ray → sphere hit → region.
//!
//! API Policy
//! - Rendering, camera control and asset fetching are collaborators of this
//!   crate, not part of it. Callers hand in rays and payloads; we hand back
//!   points, names and polylines.

pub mod api;
pub mod pick;
pub mod proj;
pub mod region;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector3 as Vec3;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::pick::{pick_geo, pick_region, pick_sphere, Ray};
    pub use crate::proj::cfg::DEFAULT_RADIUS;
    pub use crate::proj::{project, unproject, CartesianPoint, GeoError, GeoPoint};
    pub use crate::region::{
        find_containing, find_containing_region, load_region_collection, Atlas, FileSource,
        LoadCfg, LoadError, RegionCollection, RegionSource,
    };
    pub use nalgebra::Vector3 as Vec3;
}
