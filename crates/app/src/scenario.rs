//! Sweep scenario configuration
//!
//! A scenario is read from JSON: the subject's body parameters, the base
//! posture the sweeps start from, and the sweeps to run. A sweep may carry
//! its own `base_angles`, which replace the scenario's for that sweep only.

use std::fs;
use std::path::Path;

use bodycore::{BodyError, BodyParameters, JointAngles};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sweep::{AngleRange, SweepSpec, SweptAngle};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Body model error: {0}")]
    Body(#[from] BodyError),

    #[error("Invalid sweep range: start={start}, end={end}, step={step}")]
    InvalidRange { start: f64, end: f64, step: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub params: BodyParameters,
    pub base_angles: JointAngles,
    pub sweeps: Vec<ScenarioSweep>,
}

/// A sweep together with an optional posture override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSweep {
    #[serde(flatten)]
    pub sweep: SweepSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_angles: Option<JointAngles>,
}

impl ScenarioSweep {
    pub fn new(sweep: SweepSpec) -> Self {
        ScenarioSweep { sweep, base_angles: None }
    }

    /// Start this sweep from `angles` instead of the scenario posture (builder pattern)
    pub fn from_posture(mut self, angles: JointAngles) -> Self {
        self.base_angles = Some(angles);
        self
    }

    /// Posture the sweep starts from
    pub fn base(&self, scenario_base: &JointAngles) -> JointAngles {
        self.base_angles.unwrap_or(*scenario_base)
    }
}

impl Default for Scenario {
    /// The 62 kg reference subject with the sweeps of the original study.
    /// The knee sweeps were run with the arm hanging (0°) rather than raised.
    fn default() -> Self {
        let arm_down = JointAngles::new(38.0, -95.0, 30.0, 0.0);
        Scenario {
            params: BodyParameters::new(62.0, 0.2286, 0.5715, 0.4191, 0.381, 0.7366).with_foot(0.142, 0.08),
            base_angles: JointAngles::new(38.0, -95.0, 30.0, 180.0),
            sweeps: vec![
                ScenarioSweep::new(SweepSpec::FemurLength {
                    step: 0.01,
                    family: Some(AngleRange::new(SweptAngle::Torso, 30.0, 90.0, 10.0)),
                }),
                ScenarioSweep::new(SweepSpec::Angle(AngleRange::new(SweptAngle::Torso, 0.0, 90.0, 1.0))),
                ScenarioSweep::new(SweepSpec::FemurLength {
                    step: 0.01,
                    family: Some(AngleRange::new(SweptAngle::Leg, 38.0, 90.0, 10.0)),
                }),
                ScenarioSweep::new(SweepSpec::Angle(AngleRange::new(SweptAngle::Leg, 0.0, 90.0, 1.0))),
                ScenarioSweep::new(SweepSpec::FemurLength {
                    step: 0.01,
                    family: Some(AngleRange::new(SweptAngle::Knee, -95.0, -180.0 + 38.0, -10.0)),
                })
                .from_posture(arm_down),
                ScenarioSweep::new(SweepSpec::Angle(AngleRange::new(SweptAngle::Knee, 0.0, -180.0 + 38.0, -1.0)))
                    .from_posture(arm_down),
            ],
        }
    }
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self, SweepError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.params.validate()?;
        for entry in &scenario.sweeps {
            entry.sweep.validate()?;
        }
        Ok(scenario)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SweepError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_json() {
        let json = serde_json::to_string_pretty(&Scenario::default()).unwrap();
        let scenario = Scenario::from_json_str(&json).unwrap();
        assert_eq!(scenario, Scenario::default());
    }

    #[test]
    fn test_rejects_invalid_body() {
        let mut scenario = Scenario::default();
        scenario.params.arm_length = 0.0;
        let json = serde_json::to_string(&scenario).unwrap();

        let err = Scenario::from_json_str(&json).unwrap_err();
        assert!(matches!(err, SweepError::Body(BodyError::InvalidParameter { name: "arm_length", .. })));
    }

    #[test]
    fn test_rejects_range_that_never_ends() {
        let json = r#"{
            "params": {
                "body_mass": 62.0, "head_neck_length": 0.2286, "torso_length": 0.5715,
                "femur_length": 0.4191, "leg_length": 0.381, "arm_length": 0.7366
            },
            "base_angles": {"leg": 38.0, "femur": -95.0, "torso": 30.0, "arm": 0.0},
            "sweeps": [
                {"kind": "angle", "joint": "torso", "start": 0.0, "end": 90.0, "step": -1.0}
            ]
        }"#;
        let err = Scenario::from_json_str(json).unwrap_err();
        assert!(matches!(err, SweepError::InvalidRange { .. }));
    }

    #[test]
    fn test_rejects_ranges_that_cannot_finish() {
        // JSON has no infinity, so check the sweep directly
        let sweep = SweepSpec::Angle(AngleRange::new(SweptAngle::Torso, 0.0, f64::INFINITY, 1.0));
        assert!(matches!(sweep.validate(), Err(SweepError::InvalidRange { .. })));

        let json = r#"{
            "params": {
                "body_mass": 62.0, "head_neck_length": 0.2286, "torso_length": 0.5715,
                "femur_length": 0.4191, "leg_length": 0.381, "arm_length": 0.7366
            },
            "base_angles": {"leg": 38.0, "femur": -95.0, "torso": 30.0, "arm": 0.0},
            "sweeps": [
                {"kind": "angle", "joint": "torso", "start": 1.0, "end": 2.0, "step": 1e-17}
            ]
        }"#;
        let err = Scenario::from_json_str(json).unwrap_err();
        assert!(matches!(err, SweepError::InvalidRange { .. }));
    }

    #[test]
    fn test_sweep_posture_override() {
        let json = r#"{
            "params": {
                "body_mass": 62.0, "head_neck_length": 0.2286, "torso_length": 0.5715,
                "femur_length": 0.4191, "leg_length": 0.381, "arm_length": 0.7366
            },
            "base_angles": {"leg": 38.0, "femur": -95.0, "torso": 30.0, "arm": 180.0},
            "sweeps": [
                {"kind": "angle", "joint": "torso", "start": 0.0, "end": 90.0, "step": 1.0},
                {
                    "kind": "angle", "joint": "knee", "start": 0.0, "end": -142.0, "step": -1.0,
                    "base_angles": {"leg": 38.0, "femur": 0.0, "torso": 30.0, "arm": 0.0}
                }
            ]
        }"#;
        let scenario = Scenario::from_json_str(json).unwrap();
        assert_eq!(scenario.sweeps[0].base(&scenario.base_angles), scenario.base_angles);
        assert_eq!(scenario.sweeps[1].base(&scenario.base_angles).arm, 0.0);
    }

    #[test]
    fn test_default_knee_sweep_follows_study() {
        let scenario = Scenario::default();
        let knee = scenario.sweeps.last().unwrap();
        let SweepSpec::Angle(range) = &knee.sweep else {
            panic!("expected an angle sweep, got {:?}", knee.sweep);
        };
        let postures = range.postures(&knee.base(&scenario.base_angles));

        assert_eq!(postures.len(), 142);
        assert_eq!(postures[0], JointAngles::new(38.0, 0.0, 30.0, 0.0));
        assert_eq!(postures[10], JointAngles::new(38.0, -10.0, 40.0, 0.0));
    }
}
