//! Batched sweeps returning numpy arrays

use numpy::ToPyArray;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use biomechanics::BodyModel;
use bodycore::{JointAngles, range_samples};

use crate::body::PyBodyModel;
use crate::to_py_err;

fn check_range(start: f64, end: f64, step: f64) -> PyResult<()> {
    match range_samples(start, end, step) {
        Some(_) => Ok(()),
        None => Err(PyValueError::new_err(format!(
            "range never finishes or is too long: start={start}, end={end}, step={step}"
        ))),
    }
}

fn com_arrays<'py>(
    py: Python<'py>,
    parameter: &[f64],
    com_x: &[f64],
    com_y: &[f64],
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("parameter", parameter.to_pyarray_bound(py))?;
    dict.set_item("com_x", com_x.to_pyarray_bound(py))?;
    dict.set_item("com_y", com_y.to_pyarray_bound(py))?;
    Ok(dict)
}

/// Whole-body CoM against femur length for a fixed posture
///
/// Femur length runs from `start` (default half the leg length) up to, but
/// not including, `end` (default the torso length).
#[pyfunction]
#[pyo3(signature = (model, theta_leg, theta_femur, theta_torso, theta_arm, step=0.01, start=None, end=None))]
pub fn femur_length_sweep<'py>(
    py: Python<'py>,
    model: &PyBodyModel,
    theta_leg: f64,
    theta_femur: f64,
    theta_torso: f64,
    theta_arm: f64,
    step: f64,
    start: Option<f64>,
    end: Option<f64>,
) -> PyResult<Bound<'py, PyDict>> {
    if !(step > 0.0) {
        return Err(PyValueError::new_err("step must be positive"));
    }
    let base = *model.inner().params();
    let angles = JointAngles::new(theta_leg, theta_femur, theta_torso, theta_arm);
    let mut femur_length = start.unwrap_or(base.leg_length / 2.0);
    let end = end.unwrap_or(base.torso_length);
    check_range(femur_length, end, step)?;

    let mut lengths = Vec::new();
    let mut com_x = Vec::new();
    let mut com_y = Vec::new();
    while femur_length < end {
        let variant = BodyModel::with_table(base.with_femur_length(femur_length), model.inner().table().clone())
            .map_err(to_py_err)?;
        let com = variant.center_of_mass_at(&angles).map_err(to_py_err)?;
        lengths.push(femur_length);
        com_x.push(com.x);
        com_y.push(com.y);
        femur_length += step;
    }

    com_arrays(py, &lengths, &com_x, &com_y)
}

/// Whole-body CoM against one joint angle
///
/// `joint` is one of "leg", "knee", "torso" or "arm". Each "leg" step also
/// turns the femur back and the torso forward by the step; each "knee" step
/// (the femur angle) turns the torso by minus the step.
#[pyfunction]
#[pyo3(signature = (model, joint, start, end, step, theta_leg, theta_femur, theta_torso, theta_arm))]
pub fn angle_sweep<'py>(
    py: Python<'py>,
    model: &PyBodyModel,
    joint: &str,
    start: f64,
    end: f64,
    step: f64,
    theta_leg: f64,
    theta_femur: f64,
    theta_torso: f64,
    theta_arm: f64,
) -> PyResult<Bound<'py, PyDict>> {
    check_range(start, end, step)?;
    let mut angles = JointAngles::new(theta_leg, theta_femur, theta_torso, theta_arm);
    match joint {
        "leg" => angles.leg = start,
        "knee" => angles.femur = start,
        "torso" => angles.torso = start,
        "arm" => angles.arm = start,
        other => return Err(PyValueError::new_err(format!("unknown joint: {other}"))),
    }

    let mut values = Vec::new();
    let mut com_x = Vec::new();
    let mut com_y = Vec::new();
    let mut value = start;
    while (step > 0.0 && value < end) || (step < 0.0 && value > end) {
        let com = model.inner().center_of_mass_at(&angles).map_err(to_py_err)?;
        values.push(value);
        com_x.push(com.x);
        com_y.push(com.y);

        angles = match joint {
            "leg" => angles.shifted_leg(step),
            "knee" => angles.shifted_femur(step),
            "torso" => JointAngles { torso: angles.torso + step, ..angles },
            _ => JointAngles { arm: angles.arm + step, ..angles },
        };
        value += step;
    }

    com_arrays(py, &values, &com_x, &com_y)
}
