//! Forward kinematics of the planar segment chain
//!
//! The ankle is the fixed origin. Each joint further up sits at the previous
//! joint plus the connecting segment rotated by that segment's own angle
//! from vertical:
//!
//! ```text
//! ankle -> knee -> hip -> shoulder -> wrist
//!   leg     femur   torso    arm
//! ```
//!
//! When the foot is modelled, the forefoot contact point is a fixed offset
//! `(foot_length, -ankle_height)` from the ankle.

use bodycore::{Joint, JointAngles, JointCoordinates, Point};
use log::trace;

use crate::model::BodyModel;

/// Unit vector of a segment at `angle_deg` from vertical, positive anterior
pub fn segment_direction(angle_deg: f64) -> Point {
    let angle = angle_deg.to_radians();
    Point::new(angle.sin(), angle.cos())
}

/// Displacement from the lower joint of a segment to its upper joint
pub fn segment_vector(length: f64, angle_deg: f64) -> Point {
    segment_direction(angle_deg) * length
}

impl BodyModel {
    /// Joint positions for the given posture
    ///
    /// Angles are not range-checked; anatomically impossible postures still
    /// produce well-defined coordinates.
    pub fn joint_coordinates(&self, angles: &JointAngles) -> JointCoordinates {
        let params = self.params();

        let ankle = Point::zeros();
        let knee = ankle + segment_vector(params.leg_length, angles.leg);
        let hip = knee + segment_vector(params.femur_length, angles.femur);
        let shoulder = hip + segment_vector(params.torso_length, angles.torso);
        let wrist = shoulder + segment_vector(params.arm_length, angles.arm);

        let mut coords: JointCoordinates = [
            (Joint::Ankle, ankle),
            (Joint::Knee, knee),
            (Joint::Hip, hip),
            (Joint::Shoulder, shoulder),
            (Joint::Wrist, wrist),
        ]
        .into_iter()
        .collect();

        if let Some(foot) = &params.foot {
            coords.insert(Joint::Forefoot, ankle + Point::new(foot.foot_length, -foot.ankle_height));
        }

        trace!("joint coordinates for {angles:?}: {coords:?}");
        coords
    }
}
