use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BodyError, BodyResult};
use crate::types::Segment;

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Foot modelled as a triangle from the ankle to the forefoot contact point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootGeometry {
    /// Horizontal distance from the ankle to the fifth metatarsal head (m)
    pub foot_length: f64,
    /// Height of the ankle joint above the ground (m)
    pub ankle_height: f64,
}

impl FootGeometry {
    pub fn new(foot_length: f64, ankle_height: f64) -> Self {
        FootGeometry { foot_length, ankle_height }
    }

    /// Straight-line distance from the ankle to the forefoot contact (m)
    pub fn length(&self) -> f64 {
        self.foot_length.hypot(self.ankle_height)
    }

    /// Angle of the ankle→forefoot line from the downward vertical (rad)
    pub fn slope_angle(&self) -> f64 {
        (self.foot_length / self.ankle_height).atan()
    }
}

/// Anthropometric inputs for one individual
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyParameters {
    /// kg
    pub body_mass: f64,
    pub head_neck_length: f64,
    pub torso_length: f64,
    pub femur_length: f64,
    pub leg_length: f64,
    pub arm_length: f64,
    /// Present only for the extended, foot-inclusive model
    #[serde(flatten)]
    pub foot: Option<FootGeometry>,
}

impl BodyParameters {
    pub fn new(
        body_mass: f64,
        head_neck_length: f64,
        torso_length: f64,
        femur_length: f64,
        leg_length: f64,
        arm_length: f64,
    ) -> Self {
        BodyParameters {
            body_mass,
            head_neck_length,
            torso_length,
            femur_length,
            leg_length,
            arm_length,
            foot: None,
        }
    }

    /// Add foot geometry (builder pattern)
    pub fn with_foot(mut self, foot_length: f64, ankle_height: f64) -> Self {
        self.foot = Some(FootGeometry::new(foot_length, ankle_height));
        self
    }

    /// Replace the femur length (builder pattern)
    pub fn with_femur_length(mut self, femur_length: f64) -> Self {
        self.femur_length = femur_length;
        self
    }

    /// Rejects any mass or length that is not finite and strictly positive
    pub fn validate(&self) -> BodyResult<()> {
        let mut checks = vec![
            ("body_mass", self.body_mass),
            ("head_neck_length", self.head_neck_length),
            ("torso_length", self.torso_length),
            ("femur_length", self.femur_length),
            ("leg_length", self.leg_length),
            ("arm_length", self.arm_length),
        ];
        if let Some(foot) = &self.foot {
            checks.push(("foot_length", foot.foot_length));
            checks.push(("ankle_height", foot.ankle_height));
        }

        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(BodyError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    pub fn has_foot(&self) -> bool {
        self.foot.is_some()
    }

    /// Segments carried by this parameter set, distal to proximal
    pub fn segments(&self) -> Vec<Segment> {
        Segment::ALL
            .into_iter()
            .filter(|s| *s != Segment::Foot || self.has_foot())
            .collect()
    }

    /// Trunk length used for the trunk CoM: torso plus head-neck
    pub fn trunk_length(&self) -> f64 {
        self.torso_length + self.head_neck_length
    }

    /// Length along which the segment's CoM fraction is measured.
    /// `None` for the foot of a foot-less model.
    pub fn segment_length(&self, segment: Segment) -> Option<f64> {
        match segment {
            Segment::Foot => self.foot.map(|f| f.length()),
            Segment::Leg => Some(self.leg_length),
            Segment::Femur => Some(self.femur_length),
            Segment::TrunkHeadNeck => Some(self.trunk_length()),
            Segment::Arms => Some(self.arm_length),
        }
    }

    /// Body weight (N)
    pub fn body_weight(&self) -> f64 {
        self.body_mass * GRAVITY
    }
}

impl fmt::Display for BodyParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Body with the following segment lengths:")?;
        writeln!(f, "\tBody mass: {} kg", self.body_mass)?;
        writeln!(f, "\tLength of head-neck: {} m", self.head_neck_length)?;
        writeln!(f, "\tLength of torso: {} m", self.torso_length)?;
        writeln!(f, "\tLength of femur: {} m", self.femur_length)?;
        writeln!(f, "\tLength of leg: {} m", self.leg_length)?;
        write!(f, "\tLength of arm: {} m", self.arm_length)?;
        if let Some(foot) = &self.foot {
            write!(f, "\n\tLength of foot: {} m", foot.foot_length)?;
            write!(f, "\n\tHeight of ankle: {} m", foot.ankle_height)?;
        }
        Ok(())
    }
}
