//! Shared body-model vocabulary
//!
//! Coordinates use the sagittal plane: `x` is anteroposterior (positive toward
//! the front of the body), `y` is vertical (positive up). All lengths are in
//! metres, masses in kilograms and angles in degrees from true vertical.

use std::collections::BTreeMap;
use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{BodyError, BodyResult};

/// A point or vector in the sagittal plane (metres or newtons).
pub type Point = Vector2<f64>;

// Joints

/// Joints of the segment chain, in chain order from the ground up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Joint {
    /// Fifth metatarsal head, the forefoot ground contact point
    Forefoot,
    Ankle,
    Knee,
    Hip,
    Shoulder,
    Wrist,
}

impl Joint {
    /// Joints produced by the reduced (foot-less) model.
    pub const CHAIN: [Joint; 5] = [Joint::Ankle, Joint::Knee, Joint::Hip, Joint::Shoulder, Joint::Wrist];

    pub fn name(&self) -> &'static str {
        match self {
            Joint::Forefoot => "FOREFOOT",
            Joint::Ankle => "ANKLE",
            Joint::Knee => "KNEE",
            Joint::Hip => "HIP",
            Joint::Shoulder => "SHOULDER",
            Joint::Wrist => "WRIST",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Segments

/// Rigid segments of the body chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Segment {
    Foot,
    Leg,
    Femur,
    /// Trunk with the head and neck folded in
    TrunkHeadNeck,
    Arms,
}

impl Segment {
    /// Every segment, distal to proximal along the chain.
    pub const ALL: [Segment; 5] = [
        Segment::Foot,
        Segment::Leg,
        Segment::Femur,
        Segment::TrunkHeadNeck,
        Segment::Arms,
    ];

    /// The joint the segment hangs off when walking the chain up from the ankle.
    pub fn base_joint(&self) -> Joint {
        match self {
            Segment::Foot | Segment::Leg => Joint::Ankle,
            Segment::Femur => Joint::Knee,
            Segment::TrunkHeadNeck => Joint::Hip,
            Segment::Arms => Joint::Shoulder,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Segment::Foot => "FOOT",
            Segment::Leg => "LEG",
            Segment::Femur => "FEMUR",
            Segment::TrunkHeadNeck => "THN",
            Segment::Arms => "ARMS",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Joint angles

/// Segment angles for one posture query.
///
/// Each angle is measured at the joint at the lower end of its segment, from
/// true vertical, positive toward the anterior side. The angles are
/// independent of each other and are never range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointAngles {
    /// Leg (shank) angle at the ankle
    pub leg: f64,
    /// Femur angle at the knee
    pub femur: f64,
    /// Torso angle at the hip
    pub torso: f64,
    /// Arm angle at the shoulder
    pub arm: f64,
}

impl JointAngles {
    pub fn new(leg: f64, femur: f64, torso: f64, arm: f64) -> Self {
        JointAngles { leg, femur, torso, arm }
    }

    /// Angle of the segment in degrees, `None` for the foot whose
    /// orientation comes from its geometry.
    pub fn segment_angle(&self, segment: Segment) -> Option<f64> {
        match segment {
            Segment::Foot => None,
            Segment::Leg => Some(self.leg),
            Segment::Femur => Some(self.femur),
            Segment::TrunkHeadNeck => Some(self.torso),
            Segment::Arms => Some(self.arm),
        }
    }

    /// Anterior/posterior mirror image of this posture.
    pub fn mirrored(&self) -> Self {
        JointAngles {
            leg: -self.leg,
            femur: -self.femur,
            torso: -self.torso,
            arm: -self.arm,
        }
    }

    /// Tilts the leg by `delta` degrees with the compensation of the ankle
    /// sweep: the femur turns back by `delta` and the torso forward by it.
    /// Knee flexion (`leg - femur`) grows by `2 * delta`.
    pub fn shifted_leg(&self, delta: f64) -> Self {
        JointAngles {
            leg: self.leg + delta,
            femur: self.femur - delta,
            torso: self.torso + delta,
            arm: self.arm,
        }
    }

    /// Turns the femur by `delta` degrees with the compensation of the knee
    /// sweep: the torso turns by `-delta`. Hip flexion (`torso - femur`)
    /// changes by `-2 * delta`; the leg and arm are untouched.
    pub fn shifted_femur(&self, delta: f64) -> Self {
        JointAngles {
            femur: self.femur + delta,
            torso: self.torso - delta,
            ..*self
        }
    }
}

// Joint coordinates

/// Joint positions keyed by joint, with the ankle at the origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JointCoordinates {
    positions: BTreeMap<Joint, Point>,
}

impl JointCoordinates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, joint: Joint, position: Point) -> Option<Point> {
        self.positions.insert(joint, position)
    }

    pub fn remove(&mut self, joint: Joint) -> Option<Point> {
        self.positions.remove(&joint)
    }

    /// Position of `joint`, failing with [`BodyError::MissingJoint`] if absent.
    pub fn get(&self, joint: Joint) -> BodyResult<Point> {
        self.positions
            .get(&joint)
            .copied()
            .ok_or(BodyError::MissingJoint(joint))
    }

    pub fn contains(&self, joint: Joint) -> bool {
        self.positions.contains_key(&joint)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Joint, Point)> + '_ {
        self.positions.iter().map(|(j, p)| (*j, *p))
    }
}

impl FromIterator<(Joint, Point)> for JointCoordinates {
    fn from_iter<I: IntoIterator<Item = (Joint, Point)>>(iter: I) -> Self {
        JointCoordinates {
            positions: iter.into_iter().collect(),
        }
    }
}

// Segment masses

/// Segment masses in kilograms keyed by segment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentMasses {
    masses: BTreeMap<Segment, f64>,
}

impl SegmentMasses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, segment: Segment, mass: f64) -> Option<f64> {
        self.masses.insert(segment, mass)
    }

    pub fn remove(&mut self, segment: Segment) -> Option<f64> {
        self.masses.remove(&segment)
    }

    /// Mass of `segment`, failing with [`BodyError::MissingSegment`] if absent.
    pub fn get(&self, segment: Segment) -> BodyResult<f64> {
        self.masses
            .get(&segment)
            .copied()
            .ok_or(BodyError::MissingSegment(segment))
    }

    pub fn total(&self) -> f64 {
        self.masses.values().sum()
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Segment, f64)> + '_ {
        self.masses.iter().map(|(s, m)| (*s, *m))
    }
}

impl FromIterator<(Segment, f64)> for SegmentMasses {
    fn from_iter<I: IntoIterator<Item = (Segment, f64)>>(iter: I) -> Self {
        SegmentMasses {
            masses: iter.into_iter().collect(),
        }
    }
}

// Centre of mass table

/// One row of the centre-of-mass table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentCom {
    pub segment: Segment,
    /// Segment mass (kg)
    pub mass: f64,
    /// Segment centre of mass (m)
    pub com: Point,
}

impl SegmentCom {
    /// Mass-weighted position (kg·m)
    pub fn weighted(&self) -> Point {
        self.com * self.mass
    }
}

/// Per-segment centre-of-mass rows in chain order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComTable {
    pub rows: Vec<SegmentCom>,
}

impl ComTable {
    pub fn get(&self, segment: Segment) -> BodyResult<&SegmentCom> {
        self.rows
            .iter()
            .find(|row| row.segment == segment)
            .ok_or(BodyError::MissingSegment(segment))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SegmentCom> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.rows.iter().map(|row| row.mass).sum()
    }

    /// Sum of mass-weighted positions over every row.
    pub fn weighted_sum(&self) -> Point {
        self.rows
            .iter()
            .fold(Point::zeros(), |acc, row| acc + row.weighted())
    }
}

// Joint loads

/// Reaction load carried by one joint under static equilibrium.
///
/// Sign convention: forces positive up/anterior, moments positive
/// counter-clockwise (viewed with anterior to the right).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLoad {
    pub joint: Joint,
    /// Reaction force (N)
    pub force: Point,
    /// Reaction moment (N·m)
    pub moment: f64,
    /// Reaction force as a percentage of body weight
    pub force_pct_body_weight: Point,
    /// Reaction moment per kilogram of body mass (N·m/kg)
    pub moment_per_kg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_joint_is_lookup_error() {
        let coords: JointCoordinates = [(Joint::Ankle, Point::zeros())].into_iter().collect();

        assert!(coords.get(Joint::Ankle).is_ok());
        let err = coords.get(Joint::Hip).unwrap_err();
        assert!(err.is_lookup());
        assert!(matches!(err, BodyError::MissingJoint(Joint::Hip)));
    }

    #[test]
    fn test_segment_masses_total() {
        let masses: SegmentMasses = [(Segment::Leg, 2.0), (Segment::Femur, 6.5)].into_iter().collect();
        assert!((masses.total() - 8.5).abs() < 1e-12);
        assert!(matches!(masses.get(Segment::Arms), Err(BodyError::MissingSegment(Segment::Arms))));
    }

    #[test]
    fn test_shifted_leg_compensates_femur_and_torso() {
        let angles = JointAngles::new(38.0, -95.0, 30.0, 180.0);
        let shifted = angles.shifted_leg(10.0);

        assert_eq!(shifted.leg, 48.0);
        assert_eq!(shifted.femur, -105.0);
        assert_eq!(shifted.torso, 40.0);
        assert_eq!(shifted.arm, 180.0);
        assert_eq!(shifted.leg - shifted.femur, angles.leg - angles.femur + 20.0);
    }

    #[test]
    fn test_shifted_femur_moves_torso_against_femur() {
        let angles = JointAngles::new(38.0, 0.0, 30.0, 0.0);
        let shifted = angles.shifted_femur(-10.0);

        assert_eq!(shifted, JointAngles::new(38.0, -10.0, 40.0, 0.0));
        assert_eq!(shifted.torso - shifted.femur, angles.torso - angles.femur + 20.0);
    }

    #[test]
    fn test_com_table_weighted_sum() {
        let table = ComTable {
            rows: vec![
                SegmentCom { segment: Segment::Leg, mass: 2.0, com: Point::new(0.1, 0.2) },
                SegmentCom { segment: Segment::Arms, mass: 1.0, com: Point::new(-0.3, 1.0) },
            ],
        };
        let sum = table.weighted_sum();
        assert!((sum.x - (-0.1)).abs() < 1e-12);
        assert!((sum.y - 1.4).abs() < 1e-12);
        assert!((table.total_mass() - 3.0).abs() < 1e-12);
        assert!(table.get(Segment::Foot).is_err());
    }

    #[test]
    fn test_joint_serializes_by_name() {
        let json = serde_json::to_string(&Joint::Shoulder).unwrap();
        assert_eq!(json, "\"SHOULDER\"");
        let seg: Segment = serde_json::from_str("\"TRUNK_HEAD_NECK\"").unwrap();
        assert_eq!(seg, Segment::TrunkHeadNeck);
    }
}
