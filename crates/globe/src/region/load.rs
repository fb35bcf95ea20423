//! GeoJSON FeatureCollection → `RegionCollection`.
//!
//! - `Polygon` and `MultiPolygon` features become regions, in feature order.
//! - Other geometry types and `null` geometries are skipped (their feature
//!   indices are reported), matching the areal-only lookup.
//! - Positions are `[lon, lat, ...]`; trailing elements (altitude) are ignored.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::proj::GeoPoint;

use super::types::{Polygon, Region, RegionCollection, Ring};

/// Loader configuration.
#[derive(Clone, Debug)]
pub struct LoadCfg {
    /// Property key carrying the display name.
    pub name_property: String,
}

impl Default for LoadCfg {
    fn default() -> Self {
        Self {
            name_property: "name".to_string(),
        }
    }
}

/// Errors surfaced while fetching or parsing a dataset.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadError {
    /// The source could not produce a payload.
    Unreachable { source_id: String, reason: String },
    /// Payload is not JSON.
    Parse(String),
    /// Top-level object is not a `FeatureCollection`.
    NotAFeatureCollection,
    /// A feature violates the expected schema.
    InvalidFeature { index: usize, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Unreachable { source_id, reason } => {
                write!(f, "source {source_id} unreachable: {reason}")
            }
            LoadError::Parse(reason) => write!(f, "JSON parse error: {reason}"),
            LoadError::NotAFeatureCollection => write!(f, "expected GeoJSON FeatureCollection"),
            LoadError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Supplies raw dataset payloads by identifier.
pub trait RegionSource {
    fn fetch(&self, source_id: &str) -> Result<String, LoadError>;
}

/// Reads `root/<source_id>` from disk.
#[derive(Clone, Debug, Default)]
pub struct FileSource {
    pub root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl RegionSource for FileSource {
    fn fetch(&self, source_id: &str) -> Result<String, LoadError> {
        let path = self.root.join(source_id);
        fs::read_to_string(&path).map_err(|e| LoadError::Unreachable {
            source_id: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// In-memory payloads keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    entries: Vec<(String, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source_id: impl Into<String>, payload: impl Into<String>) -> Self {
        self.entries.push((source_id.into(), payload.into()));
        self
    }
}

impl RegionSource for MemorySource {
    fn fetch(&self, source_id: &str) -> Result<String, LoadError> {
        self.entries
            .iter()
            .find(|(id, _)| id == source_id)
            .map(|(_, payload)| payload.clone())
            .ok_or_else(|| LoadError::Unreachable {
                source_id: source_id.to_string(),
                reason: "no such entry".to_string(),
            })
    }
}

/// Parsed collection plus the indices of features that were not areal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub collection: RegionCollection,
    pub skipped: Vec<usize>,
}

/// Fetch `source_id` from `source` and parse it.
pub fn load_region_collection(
    source: &dyn RegionSource,
    source_id: &str,
    cfg: &LoadCfg,
) -> Result<RegionCollection, LoadError> {
    load_with_report(source, source_id, cfg).map(|report| report.collection)
}

/// Like `load_region_collection`, keeping the skipped-feature report.
pub fn load_with_report(
    source: &dyn RegionSource,
    source_id: &str,
    cfg: &LoadCfg,
) -> Result<LoadReport, LoadError> {
    let payload = source.fetch(source_id)?;
    parse_geojson_str(&payload, cfg)
}

pub fn parse_geojson_str(payload: &str, cfg: &LoadCfg) -> Result<LoadReport, LoadError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| LoadError::Parse(e.to_string()))?;
    parse_geojson_value(&value, cfg)
}

pub fn parse_geojson_value(value: &Value, cfg: &LoadCfg) -> Result<LoadReport, LoadError> {
    let obj = value.as_object().ok_or(LoadError::NotAFeatureCollection)?;
    if obj.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
        return Err(LoadError::NotAFeatureCollection);
    }
    let features = obj
        .get("features")
        .and_then(Value::as_array)
        .ok_or(LoadError::NotAFeatureCollection)?;

    let mut regions = Vec::with_capacity(features.len());
    let mut skipped = Vec::new();
    for (index, feature) in features.iter().enumerate() {
        let parsed = parse_feature(feature, cfg)
            .map_err(|reason| LoadError::InvalidFeature { index, reason })?;
        match parsed {
            Some(region) => regions.push(region),
            None => skipped.push(index),
        }
    }
    Ok(LoadReport {
        collection: RegionCollection::new(regions),
        skipped,
    })
}

fn parse_feature(feature: &Value, cfg: &LoadCfg) -> Result<Option<Region>, String> {
    let obj = feature
        .as_object()
        .ok_or("feature must be an object".to_string())?;
    let geometry = match obj.get("geometry") {
        None => return Err("feature missing geometry".to_string()),
        Some(Value::Null) => return Ok(None),
        Some(g) => g
            .as_object()
            .ok_or("geometry must be an object".to_string())?,
    };
    let ty = geometry
        .get("type")
        .and_then(Value::as_str)
        .ok_or("geometry missing type".to_string())?;
    if ty != "Polygon" && ty != "MultiPolygon" {
        return Ok(None);
    }

    let name = obj
        .get("properties")
        .and_then(|p| p.get(&cfg.name_property))
        .and_then(name_of)
        .ok_or_else(|| format!("missing `{}` property", cfg.name_property))?;
    let coords = geometry
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    let region = if ty == "Polygon" {
        Region::polygon(name, parse_polygon(coords)?)
    } else {
        let polys = coords
            .as_array()
            .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?
            .iter()
            .map(parse_polygon)
            .collect::<Result<Vec<_>, _>>()?;
        Region::multi_polygon(name, polys)
    };
    Ok(Some(region))
}

fn name_of(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_polygon(coords: &Value) -> Result<Polygon, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut rings = rings.iter().map(parse_ring);
    let outer = match rings.next() {
        Some(r) => r?,
        None => return Err("Polygon has no rings".to_string()),
    };
    let holes = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::with_holes(outer, holes))
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?
        .iter()
        .map(parse_position)
        .collect()
}

fn parse_position(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(GeoPoint::from_lon_lat(lon, lat))
}
