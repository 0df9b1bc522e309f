//! Parametric posture sweeps
//!
//! Each sweep varies one quantity (a joint angle or the femur length) and
//! records the whole-body CoM at every sample. Femur-length sweeps may carry
//! a family: one curve per value of a joint angle.

use biomechanics::BodyModel;
use bodycore::{BodyParameters, JointAngles, MAX_RANGE_SAMPLES, range_samples};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::scenario::SweepError;

const FEMUR_LENGTH_STEP_FLOOR: f64 = 1e-4;

/// Joint angle a sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweptAngle {
    /// Leg angle at the ankle; each step also turns the femur back and the
    /// torso forward by the same amount (see [`JointAngles::shifted_leg`])
    Leg,
    /// Femur angle at the knee; each step turns the torso the opposite way
    /// (see [`JointAngles::shifted_femur`])
    Knee,
    /// Torso angle at the hip
    Torso,
    /// Arm angle at the shoulder
    Arm,
}

impl SweptAngle {
    pub fn label(&self) -> &'static str {
        match self {
            SweptAngle::Leg => "leg angle",
            SweptAngle::Knee => "knee angle",
            SweptAngle::Torso => "torso angle",
            SweptAngle::Arm => "arm angle",
        }
    }

    pub fn value(&self, angles: &JointAngles) -> f64 {
        match self {
            SweptAngle::Leg => angles.leg,
            SweptAngle::Knee => angles.femur,
            SweptAngle::Torso => angles.torso,
            SweptAngle::Arm => angles.arm,
        }
    }

    /// Posture with this angle set to `value` and every other angle untouched
    pub fn set(&self, angles: &JointAngles, value: f64) -> JointAngles {
        let mut out = *angles;
        match self {
            SweptAngle::Leg => out.leg = value,
            SweptAngle::Knee => out.femur = value,
            SweptAngle::Torso => out.torso = value,
            SweptAngle::Arm => out.arm = value,
        }
        out
    }

    /// Posture after moving this angle by `delta`
    pub fn advance(&self, angles: &JointAngles, delta: f64) -> JointAngles {
        match self {
            SweptAngle::Leg => angles.shifted_leg(delta),
            SweptAngle::Knee => angles.shifted_femur(delta),
            _ => self.set(angles, self.value(angles) + delta),
        }
    }
}

/// Half-open range `[start, end)` walked in `step` increments; `step` may be
/// negative for a descending sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub joint: SweptAngle,
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl AngleRange {
    pub fn new(joint: SweptAngle, start: f64, end: f64, step: f64) -> Self {
        AngleRange { joint, start, end, step }
    }

    /// Rejects ranges that would not terminate (see [`range_samples`])
    pub fn validate(&self) -> Result<(), SweepError> {
        if range_samples(self.start, self.end, self.step).is_none() {
            return Err(SweepError::InvalidRange {
                start: self.start,
                end: self.end,
                step: self.step,
            });
        }
        Ok(())
    }

    fn contains(&self, value: f64) -> bool {
        if self.step > 0.0 { value < self.end } else { value > self.end }
    }

    /// Postures visited by the range, starting from `base` with the swept
    /// angle set to `start`. Stops after [`MAX_RANGE_SAMPLES`] postures.
    pub fn postures(&self, base: &JointAngles) -> Vec<JointAngles> {
        let mut out = Vec::new();
        let mut angles = self.joint.set(base, self.start);
        while out.len() < MAX_RANGE_SAMPLES && self.contains(self.joint.value(&angles)) {
            out.push(angles);
            angles = self.joint.advance(&angles, self.step);
        }
        out
    }
}

/// One sweep of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SweepSpec {
    /// CoM against a single joint angle
    Angle(AngleRange),
    /// CoM against femur length, from half the leg length up to the torso
    /// length, optionally repeated for each posture in `family`
    FemurLength { step: f64, family: Option<AngleRange> },
}

impl SweepSpec {
    pub fn validate(&self) -> Result<(), SweepError> {
        match self {
            SweepSpec::Angle(range) => range.validate(),
            SweepSpec::FemurLength { step, family } => {
                if !step.is_finite() || *step < FEMUR_LENGTH_STEP_FLOOR {
                    return Err(SweepError::InvalidRange { start: 0.0, end: 0.0, step: *step });
                }
                family.as_ref().map_or(Ok(()), AngleRange::validate)
            }
        }
    }

    /// File-friendly name
    pub fn name(&self) -> String {
        match self {
            SweepSpec::Angle(range) => range.joint.label().replace(' ', "_"),
            SweepSpec::FemurLength { family: Some(range), .. } => {
                format!("femur_length_by_{}", range.joint.label().replace(' ', "_"))
            }
            SweepSpec::FemurLength { family: None, .. } => "femur_length".to_string(),
        }
    }

    pub fn parameter_label(&self) -> &'static str {
        match self {
            SweepSpec::Angle(range) => range.joint.label(),
            SweepSpec::FemurLength { .. } => "femur length",
        }
    }

    pub fn run(&self, params: &BodyParameters, base: &JointAngles) -> Result<Vec<SweepSeries>, SweepError> {
        self.validate()?;
        let series = match self {
            SweepSpec::Angle(range) => {
                let model = BodyModel::new(*params)?;
                let points = range
                    .postures(base)
                    .iter()
                    .map(|angles| SweepPoint::sample(&model, angles, range.joint.value(angles)))
                    .collect::<Result<Vec<_>, _>>()?;
                vec![SweepSeries { label: self.parameter_label().to_string(), points }]
            }
            SweepSpec::FemurLength { step, family } => {
                let postures = match family {
                    Some(range) => range.postures(base),
                    None => vec![*base],
                };
                postures
                    .iter()
                    .map(|angles| {
                        let label = match family {
                            Some(range) => format!("{}: {}°", range.joint.label(), range.joint.value(angles)),
                            None => "femur length".to_string(),
                        };
                        femur_length_series(params, angles, *step, label)
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let samples: usize = series.iter().map(|s| s.points.len()).sum();
        info!("sweep {}: {} curve(s), {} samples", self.name(), series.len(), samples);
        Ok(series)
    }
}

fn femur_length_series(
    params: &BodyParameters,
    angles: &JointAngles,
    step: f64,
    label: String,
) -> Result<SweepSeries, SweepError> {
    let mut points = Vec::new();
    let mut femur_length = params.leg_length / 2.0;
    while femur_length < params.torso_length {
        let model = BodyModel::new(params.with_femur_length(femur_length))?;
        points.push(SweepPoint::sample(&model, angles, femur_length)?);
        femur_length += step;
    }
    debug!("{label}: {} samples", points.len());
    Ok(SweepSeries { label, points })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub parameter: f64,
    pub com_x: f64,
    pub com_y: f64,
}

impl SweepPoint {
    fn sample(model: &BodyModel, angles: &JointAngles, parameter: f64) -> Result<Self, SweepError> {
        let com = model.center_of_mass_at(angles)?;
        Ok(SweepPoint { parameter, com_x: com.x, com_y: com.y })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSeries {
    pub label: String,
    pub points: Vec<SweepPoint>,
}
