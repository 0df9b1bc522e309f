//! Python bindings for the body model
//!
//! Sweep drivers and plotting stay in Python; this module exposes:
//! - `BodyModel` with the per-posture queries returning dicts and lists
//! - Batched femur-length and angle sweeps returning numpy arrays, so a
//!   whole curve costs a single Python↔Rust crossing

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

use bodycore::BodyError;

mod body;
mod sweep;

pub use body::*;

pub(crate) fn to_py_err(err: BodyError) -> PyErr {
    if err.is_lookup() {
        PyKeyError::new_err(err.to_string())
    } else {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module for the sagittal-plane body model
#[pymodule]
fn posture_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<body::PyBodyModel>()?;
    m.add_function(wrap_pyfunction!(sweep::femur_length_sweep, m)?)?;
    m.add_function(wrap_pyfunction!(sweep::angle_sweep, m)?)?;
    Ok(())
}
