//! Region dataset handle.

use crate::common::map_load_err;
use globe::api::{find_containing_region, parse_geojson_str, GeoPoint, LoadCfg, RegionCollection};
use pyo3::prelude::*;

#[pyclass]
pub struct Regions {
    inner: RegionCollection,
}

#[pymethods]
impl Regions {
    /// Parse a GeoJSON FeatureCollection string.
    #[new]
    #[pyo3(signature = (payload, name_property = "name"))]
    fn new(payload: &str, name_property: &str) -> PyResult<Self> {
        let cfg = LoadCfg {
            name_property: name_property.to_string(),
        };
        let report = parse_geojson_str(payload, &cfg).map_err(map_load_err)?;
        Ok(Self {
            inner: report.collection,
        })
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Name of the first region containing (lat, lon), or None.
    fn find(&self, lat: f64, lon: f64) -> Option<String> {
        find_containing_region(&self.inner, GeoPoint::new(lat, lon)).map(str::to_string)
    }
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_class::<Regions>()?;
    Ok(())
}
