//! PyO3 bindings for selected `globe` functions.
//!
//! Notes
//! - Keep bindings thin; coordinates cross the boundary as plain tuples.
//! - Datasets are loaded into a `Regions` handle once and queried many times.

use pyo3::prelude::*;

mod common;
mod geom;
mod regions;

#[pymodule]
fn globe_native(_py: Python, m: &PyModule) -> PyResult<()> {
    geom::register(m)?;
    regions::register(m)?;
    Ok(())
}
