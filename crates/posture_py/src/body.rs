//! BodyModel bindings

use pyo3::prelude::*;
use pyo3::types::PyDict;

use biomechanics::BodyModel;
use bodycore::{BodyParameters, JointAngles};

use crate::to_py_err;

/// Python-accessible body model
///
/// Angles are in degrees from vertical, positive toward the front of the body.
#[pyclass(name = "BodyModel")]
#[derive(Clone)]
pub struct PyBodyModel {
    inner: BodyModel,
}

impl PyBodyModel {
    pub fn inner(&self) -> &BodyModel {
        &self.inner
    }
}

#[pymethods]
impl PyBodyModel {
    /// Create a body model
    ///
    /// Args:
    ///     body_mass: Body mass in kg.
    ///     head_neck_length, torso_length, femur_length, leg_length, arm_length: Segment lengths in m.
    ///     foot_length, ankle_height: Foot geometry in m; both must be given to model the foot.
    #[new]
    #[pyo3(signature = (body_mass, head_neck_length, torso_length, femur_length, leg_length, arm_length, foot_length=None, ankle_height=None))]
    fn new(
        body_mass: f64,
        head_neck_length: f64,
        torso_length: f64,
        femur_length: f64,
        leg_length: f64,
        arm_length: f64,
        foot_length: Option<f64>,
        ankle_height: Option<f64>,
    ) -> PyResult<Self> {
        let mut params = BodyParameters::new(body_mass, head_neck_length, torso_length, femur_length, leg_length, arm_length);
        match (foot_length, ankle_height) {
            (Some(length), Some(height)) => params = params.with_foot(length, height),
            (None, None) => {}
            _ => {
                return Err(pyo3::exceptions::PyValueError::new_err(
                    "foot_length and ankle_height must be given together",
                ))
            }
        }
        let inner = BodyModel::new(params).map_err(to_py_err)?;
        Ok(PyBodyModel { inner })
    }

    /// Whether the foot segment is modelled
    fn has_foot(&self) -> bool {
        self.inner.has_foot()
    }

    /// Joint positions as {"ANKLE": (x, y), ...}
    fn joint_coordinates<'py>(
        &self,
        py: Python<'py>,
        theta_leg: f64,
        theta_femur: f64,
        theta_torso: f64,
        theta_arm: f64,
    ) -> PyResult<Bound<'py, PyDict>> {
        let angles = JointAngles::new(theta_leg, theta_femur, theta_torso, theta_arm);
        let dict = PyDict::new_bound(py);
        for (joint, position) in self.inner.joint_coordinates(&angles).iter() {
            dict.set_item(joint.name(), (position.x, position.y))?;
        }
        Ok(dict)
    }

    /// Segment masses as {"LEG": kg, ...}
    fn segment_masses<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        for (segment, mass) in self.inner.segment_masses().iter() {
            dict.set_item(segment.name(), mass)?;
        }
        Ok(dict)
    }

    /// Per-segment CoM rows and the whole-body CoM
    ///
    /// Returns:
    ///     (rows, (x, y)) where each row is a dict with segment, mass, com_x,
    ///     com_y, com_x_mass and com_y_mass.
    fn body_com<'py>(
        &self,
        py: Python<'py>,
        theta_leg: f64,
        theta_femur: f64,
        theta_torso: f64,
        theta_arm: f64,
    ) -> PyResult<(Vec<Bound<'py, PyDict>>, (f64, f64))> {
        let angles = JointAngles::new(theta_leg, theta_femur, theta_torso, theta_arm);
        let (table, com) = self.inner.center_of_mass(&angles, None, None).map_err(to_py_err)?;

        let rows = table
            .iter()
            .map(|row| {
                let dict = PyDict::new_bound(py);
                let weighted = row.weighted();
                dict.set_item("segment", row.segment.name())?;
                dict.set_item("mass", row.mass)?;
                dict.set_item("com_x", row.com.x)?;
                dict.set_item("com_y", row.com.y)?;
                dict.set_item("com_x_mass", weighted.x)?;
                dict.set_item("com_y_mass", weighted.y)?;
                Ok(dict)
            })
            .collect::<PyResult<Vec<_>>>()?;

        Ok((rows, (com.x, com.y)))
    }

    /// Joint reaction loads at the ankle, knee and hip (foot model only)
    ///
    /// Returns:
    ///     List of dicts with joint, fx, fy, moment, fx_pct_bw, fy_pct_bw
    ///     and moment_per_kg.
    fn joint_loads<'py>(
        &self,
        py: Python<'py>,
        theta_leg: f64,
        theta_femur: f64,
        theta_torso: f64,
        theta_arm: f64,
    ) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let angles = JointAngles::new(theta_leg, theta_femur, theta_torso, theta_arm);
        let coords = self.inner.joint_coordinates(&angles);
        let (table, com) = self
            .inner
            .center_of_mass(&angles, Some(&coords), None)
            .map_err(to_py_err)?;
        let loads = self.inner.joint_loads(&table, &com, &coords).map_err(to_py_err)?;

        loads
            .iter()
            .map(|load| {
                let dict = PyDict::new_bound(py);
                dict.set_item("joint", load.joint.name())?;
                dict.set_item("fx", load.force.x)?;
                dict.set_item("fy", load.force.y)?;
                dict.set_item("moment", load.moment)?;
                dict.set_item("fx_pct_bw", load.force_pct_body_weight.x)?;
                dict.set_item("fy_pct_bw", load.force_pct_body_weight.y)?;
                dict.set_item("moment_per_kg", load.moment_per_kg)?;
                Ok(dict)
            })
            .collect()
    }

    fn __repr__(&self) -> String {
        let p = self.inner.params();
        format!(
            "BodyModel(body_mass={}, femur_length={}, has_foot={})",
            p.body_mass,
            p.femur_length,
            p.has_foot()
        )
    }
}
