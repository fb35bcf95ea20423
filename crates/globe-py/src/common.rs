use globe::api::{GeoError, LoadError};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::PyErr;

pub fn map_geo_err(err: GeoError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub fn map_load_err(err: LoadError) -> PyErr {
    match err {
        LoadError::Unreachable { .. } => PyIOError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}
