//! Marker tables: project lat/lon columns onto the globe.
//!
//! Input is any CSV with latitude and longitude columns (extra columns, such as
//! a population count, are carried through). Rows with a missing or non-finite
//! coordinate get null `x`/`y`/`z`. Output format follows the extension:
//! `.parquet` writes Parquet, anything else CSV.

use anyhow::{Context, Result};
use globe::api::{project, GeoPoint};
use polars::prelude::*;
use serde_json::{json, Value};
use std::fs::File;
use std::path::Path;

use crate::provenance;

/// Append `x`, `y`, `z` columns for every row of `df`.
///
/// Returns the number of rows that could not be projected.
pub fn add_cartesian_columns(
    df: &mut DataFrame,
    radius: f64,
    lat_col: &str,
    lon_col: &str,
) -> Result<usize> {
    let lat = df
        .column(lat_col)
        .with_context(|| format!("missing latitude column `{lat_col}`"))?
        .cast(&DataType::Float64)?;
    let lon = df
        .column(lon_col)
        .with_context(|| format!("missing longitude column `{lon_col}`"))?
        .cast(&DataType::Float64)?;

    let n = df.height();
    let (mut xs, mut ys, mut zs) = (
        Vec::with_capacity(n),
        Vec::with_capacity(n),
        Vec::with_capacity(n),
    );
    let mut dropped = 0usize;
    for (la, lo) in lat.f64()?.into_iter().zip(lon.f64()?.into_iter()) {
        match la.zip(lo).and_then(|(la, lo)| GeoPoint::try_new(la, lo).ok()) {
            Some(g) => {
                let p = project(g, radius);
                xs.push(Some(p.x));
                ys.push(Some(p.y));
                zs.push(Some(p.z));
            }
            None => {
                dropped += 1;
                xs.push(None);
                ys.push(None);
                zs.push(None);
            }
        }
    }
    df.with_column(Series::new("x".into(), xs))?;
    df.with_column(Series::new("y".into(), ys))?;
    df.with_column(Series::new("z".into(), zs))?;
    Ok(dropped)
}

fn write_table(df: &mut DataFrame, out: &Path) -> Result<()> {
    provenance::ensure_parent(out)?;
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    if out.extension().and_then(|e| e.to_str()) == Some("parquet") {
        ParquetWriter::new(&mut file).finish(df)?;
    } else {
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
    }
    Ok(())
}

pub fn run(input: &Path, out: &Path, radius: f64, lat_col: &str, lon_col: &str) -> Result<Value> {
    let mut df = LazyCsvReader::new(input)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("reading {}", input.display()))?
        .collect()?;
    let dropped = add_cartesian_columns(&mut df, radius, lat_col, lon_col)?;
    if dropped > 0 {
        tracing::warn!(dropped, "markers_without_coordinates");
    }
    tracing::info!(rows = df.height(), cols = df.width(), radius, "markers");
    write_table(&mut df, out)?;

    let mut payload = provenance::Payload::new(json!({
        "command": "markers",
        "radius": radius,
        "lat_col": lat_col,
        "lon_col": lon_col,
    }));
    payload.inputs.push(input.to_string_lossy().into_owned());
    let prov = provenance::write_sidecar(out, payload)?;
    Ok(json!({
        "out": out.to_string_lossy(),
        "provenance": prov.to_string_lossy(),
        "rows": df.height(),
        "dropped": dropped,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn csv_round_trip_adds_columns() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cities.csv");
        fs::write(
            &input,
            "name,lat,lon,population\nnull_island,0,0,0\nbuenos_aires,-34.6,-58.4,3075646\nnowhere,,10,1\n",
        )
        .unwrap();
        let out = dir.path().join("out/cities_xyz.csv");
        let summary = run(&input, &out, 5.0, "lat", "lon").unwrap();
        assert_eq!(summary["rows"], 3);
        assert_eq!(summary["dropped"], 1);
        assert!(dir.path().join("out/cities_xyz.provenance.json").exists());

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(out))
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(df.width(), 7);
        let z = df.column("z").unwrap().cast(&DataType::Float64).unwrap();
        let z = z.f64().unwrap();
        assert!((z.get(0).unwrap() - 5.0).abs() < 1e-9);
        assert!(z.get(2).is_none());
    }

    #[test]
    fn missing_column_is_an_error() {
        let mut df = df!("latitude" => [1.0f64], "lon" => [2.0f64]).unwrap();
        let err = add_cartesian_columns(&mut df, 5.0, "lat", "lon").unwrap_err();
        assert!(err.to_string().contains("lat"));
    }
}
