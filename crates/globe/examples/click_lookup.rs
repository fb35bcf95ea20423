//! Resolve a few simulated pointer clicks on the globe to region names.
//!
//! Usage:
//!   cargo run -p globe --example click_lookup
//!   cargo run -p globe --example click_lookup -- path/to/countries.geojson
//!
//! Each click is a camera ray aimed at a (lat, lon); the ray is intersected
//! with the sphere, unprojected, and looked up in the dataset.

use std::path::Path;

use globe::prelude::*;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/data/regions.geojson").to_string());
    let path = Path::new(&path);
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let file = path.file_name().and_then(|f| f.to_str()).unwrap_or_default();

    let mut atlas = Atlas::new();
    let source = FileSource::new(root);
    match atlas.load(&source, file, &LoadCfg::default()) {
        Ok(Ok(skipped)) => println!("loaded {file} (skipped {} features)", skipped.len()),
        Ok(Err(err)) => println!("load failed, continuing without regions: {err}"),
        Err(err) => println!("{err}"),
    }

    let camera_distance = 4.0 * DEFAULT_RADIUS;
    for &(lat, lon) in &[(5.0, 5.0), (25.0, 25.0), (50.0, 50.0), (-33.0, -64.0)] {
        let target = project(GeoPoint::new(lat, lon), DEFAULT_RADIUS).to_vector();
        let origin = target.normalize() * camera_distance;
        let ray = Ray::new(origin, target - origin);
        let q = match pick_geo(&ray, DEFAULT_RADIUS) {
            Ok(Some(q)) => q,
            Ok(None) => {
                println!("click at ({lat}, {lon}): missed the globe");
                continue;
            }
            Err(err) => {
                println!("click at ({lat}, {lon}): {err}");
                continue;
            }
        };
        match atlas.find_any(q) {
            Some((dataset, name)) => println!(
                "click at ({:.3}, {:.3}): {name} [{dataset}]",
                q.lat, q.lon
            ),
            None => println!("click at ({:.3}, {:.3}): no region", q.lat, q.lon),
        }
    }
}
