use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use globe::api::{
    bounding_radius, load_region_collection, outlines, project, unproject, Atlas, CartesianPoint,
    FileSource, GeoPoint, LoadCfg, DEFAULT_RADIUS,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod markers;
mod provenance;

#[derive(Parser)]
#[command(name = "globe")]
#[command(about = "Globe projection and region lookup")]
struct Cmd {
    /// Property key holding region names in GeoJSON features
    #[arg(long, global = true, default_value = "name")]
    name_property: String,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Project (lat, lon) onto the sphere
    Project {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long, default_value_t = DEFAULT_RADIUS)]
        radius: f64,
    },
    /// Recover (lat, lon) from a point in R³
    Unproject {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, allow_negative_numbers = true)]
        z: f64,
    },
    /// Find the first region containing (lat, lon) across datasets, in order
    Lookup {
        #[arg(long = "data", required = true)]
        data: Vec<PathBuf>,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Write projected border polylines as JSON
    Outline {
        #[arg(long)]
        data: PathBuf,
        #[arg(long, default_value_t = DEFAULT_RADIUS)]
        radius: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Add x/y/z columns to a CSV of lat/lon markers (CSV or Parquet output)
    Markers {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = DEFAULT_RADIUS)]
        radius: f64,
        #[arg(long, default_value = "lat")]
        lat_col: String,
        #[arg(long, default_value = "lon")]
        lon_col: String,
    },
}

#[derive(Serialize)]
struct LookupOut {
    lat: f64,
    lon: f64,
    dataset: Option<String>,
    region: Option<String>,
}

fn main() -> Result<()> {
    // stdout carries the JSON result only
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let cfg = LoadCfg {
        name_property: cmd.name_property,
    };
    let out = match cmd.action {
        Action::Project { lat, lon, radius } => run_project(lat, lon, radius)?,
        Action::Unproject { x, y, z } => run_unproject(x, y, z)?,
        Action::Lookup { data, lat, lon } => run_lookup(&data, lat, lon, &cfg)?,
        Action::Outline { data, radius, out } => run_outline(&data, radius, &out, &cfg)?,
        Action::Markers {
            input,
            out,
            radius,
            lat_col,
            lon_col,
        } => markers::run(&input, &out, radius, &lat_col, &lon_col)?,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn geo_arg(lat: f64, lon: f64) -> Result<GeoPoint> {
    GeoPoint::try_new(lat, lon).with_context(|| format!("invalid coordinate ({lat}, {lon})"))
}

fn run_project(lat: f64, lon: f64, radius: f64) -> Result<Value> {
    let p = project(geo_arg(lat, lon)?, radius);
    tracing::info!(lat, lon, radius, "project");
    Ok(json!({ "x": p.x, "y": p.y, "z": p.z }))
}

fn run_unproject(x: f64, y: f64, z: f64) -> Result<Value> {
    let g = unproject(CartesianPoint::new(x, y, z))
        .with_context(|| format!("cannot unproject ({x}, {y}, {z})"))?;
    tracing::info!(x, y, z, "unproject");
    Ok(json!({ "lat": g.lat, "lon": g.lon }))
}

/// Datasets are identified by the path as given, so same-named files in
/// different directories stay distinct.
fn dataset_id(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn run_lookup(data: &[PathBuf], lat: f64, lon: f64, cfg: &LoadCfg) -> Result<Value> {
    let q = geo_arg(lat, lon)?;
    let source = FileSource::new(PathBuf::new());
    let mut atlas = Atlas::new();
    let mut ids = Vec::with_capacity(data.len());
    for path in data {
        let id = dataset_id(path);
        if ids.contains(&id) {
            bail!("dataset {id} given twice");
        }
        // A failed dataset is logged and treated as empty.
        match atlas.load(&source, &id, cfg)? {
            Ok(skipped) => tracing::info!(dataset = %id, skipped = skipped.len(), "dataset_ready"),
            Err(err) => tracing::warn!(dataset = %id, error = %err, "dataset_load_failed"),
        }
        ids.push(id);
    }
    let hit = atlas.find_any(q);
    tracing::info!(lat, lon, region = ?hit.map(|h| h.1), "lookup");
    let out = LookupOut {
        lat,
        lon,
        dataset: hit.map(|(d, _)| d.to_string()),
        region: hit.map(|(_, r)| r.to_string()),
    };
    Ok(serde_json::to_value(out)?)
}

fn run_outline(data: &Path, radius: f64, out: &Path, cfg: &LoadCfg) -> Result<Value> {
    let source = FileSource::new(PathBuf::new());
    let id = dataset_id(data);
    let collection = load_region_collection(&source, &id, cfg)
        .with_context(|| format!("loading {}", data.display()))?;
    let lines = outlines(&collection, radius);
    let fit = bounding_radius(&lines);
    tracing::info!(
        dataset = %id,
        regions = collection.len(),
        polylines = lines.len(),
        bounding_radius = ?fit,
        "outline"
    );
    let polylines: Vec<Vec<[f64; 3]>> = lines
        .iter()
        .map(|l| l.iter().map(|p| [p.x, p.y, p.z]).collect())
        .collect();
    let doc = json!({
        "radius": radius,
        "bounding_radius": fit,
        "polylines": polylines,
    });
    provenance::ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let mut payload = provenance::Payload::new(json!({
        "command": "outline",
        "radius": radius,
        "name_property": cfg.name_property,
    }));
    payload.inputs.push(data.to_string_lossy().into_owned());
    let prov = provenance::write_sidecar(out, payload)?;
    Ok(json!({
        "out": out.to_string_lossy(),
        "provenance": prov.to_string_lossy(),
        "regions": collection.len(),
        "polylines": lines.len(),
        "bounding_radius": fit,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixture() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../globe/data/regions.geojson")
    }

    #[test]
    fn project_and_unproject_json() {
        let p = run_project(0.0, 90.0, 2.0).unwrap();
        assert!((p["x"].as_f64().unwrap() - 2.0).abs() < 1e-12);
        let g = run_unproject(0.0, 0.0, 3.0).unwrap();
        assert!(g["lat"].as_f64().unwrap().abs() < 1e-12);
        assert!(run_unproject(0.0, 0.0, 0.0).is_err());
        assert!(run_project(f64::NAN, 0.0, 5.0).is_err());
    }

    #[test]
    fn lookup_skips_missing_dataset() {
        let cfg = LoadCfg::default();
        let missing = PathBuf::from("/nonexistent/none.geojson");
        let out = run_lookup(&[missing, fixture()], 25.0, 25.0, &cfg).unwrap();
        assert_eq!(out["region"], "Islands");
        assert_eq!(out["dataset"], fixture().to_string_lossy().as_ref());
        let none = run_lookup(&[fixture()], -45.0, 100.0, &cfg).unwrap();
        assert!(none["region"].is_null());
    }

    #[test]
    fn same_file_name_in_different_dirs_are_distinct_datasets() {
        let square = |name: &str, lo: f64| {
            format!(
                r#"{{"type":"FeatureCollection","features":[{{"type":"Feature",
                "properties":{{"name":"{name}"}},
                "geometry":{{"type":"Polygon","coordinates":[[[{lo},0],[{hi},0],[{hi},10],[{lo},10],[{lo},0]]]}}}}]}}"#,
                hi = lo + 10.0
            )
        };
        let europe = tempdir().unwrap();
        let asia = tempdir().unwrap();
        let eu = europe.path().join("countries.geojson");
        let as_ = asia.path().join("countries.geojson");
        std::fs::write(&eu, square("Westland", 0.0)).unwrap();
        std::fs::write(&as_, square("Eastland", 100.0)).unwrap();

        let cfg = LoadCfg::default();
        let data = [eu.clone(), as_.clone()];
        let west = run_lookup(&data, 5.0, 5.0, &cfg).unwrap();
        assert_eq!(west["region"], "Westland");
        assert_eq!(west["dataset"], eu.to_string_lossy().as_ref());
        let east = run_lookup(&data, 5.0, 105.0, &cfg).unwrap();
        assert_eq!(east["region"], "Eastland");
        assert_eq!(east["dataset"], as_.to_string_lossy().as_ref());

        // The exact same path twice is still rejected.
        assert!(run_lookup(&[eu.clone(), eu], 5.0, 5.0, &cfg).is_err());
    }

    #[test]
    fn outline_writes_artifact_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/borders.json");
        let summary = run_outline(&fixture(), 5.0, &out, &LoadCfg::default()).unwrap();
        assert_eq!(summary["polylines"], 5);
        let doc: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["polylines"].as_array().unwrap().len(), 5);
        assert!((doc["bounding_radius"].as_f64().unwrap() - 5.0).abs() < 1e-12);
        assert!(dir.path().join("nested/borders.provenance.json").exists());
    }
}
