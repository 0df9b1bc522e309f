//! Centre-of-mass aggregation
//!
//! Each segment CoM sits a fixed fraction of the segment length from its
//! base joint, along the segment's own direction. The foot has no angle
//! input; its direction is the ankle→forefoot line, which is fixed by the
//! foot geometry. The trunk CoM is measured along torso + head-neck length.
//!
//! The whole-body CoM is `Σ(mᵢ·rᵢ) / body_mass`, evaluated in closed form.

use bodycore::{
    BodyError, BodyResult, ComTable, JointAngles, JointCoordinates, Point, Segment, SegmentCom,
    SegmentMasses,
};
use log::debug;

use crate::kinematics::segment_direction;
use crate::model::BodyModel;

impl BodyModel {
    /// Unit vector from the segment's base joint toward its far end
    fn com_direction(&self, segment: Segment, angles: &JointAngles) -> BodyResult<Point> {
        match angles.segment_angle(segment) {
            Some(angle) => Ok(segment_direction(angle)),
            None => {
                let foot = self.params().foot.ok_or(BodyError::FootNotModeled)?;
                let slope = foot.slope_angle();
                Ok(Point::new(slope.sin(), -slope.cos()))
            }
        }
    }

    /// Centre of mass of a single segment
    pub fn segment_com(
        &self,
        segment: Segment,
        angles: &JointAngles,
        coords: &JointCoordinates,
    ) -> BodyResult<Point> {
        let base = coords.get(segment.base_joint())?;
        let length = self
            .params()
            .segment_length(segment)
            .ok_or(BodyError::FootNotModeled)?;
        let fraction = self.table().ratios(segment).fraction_from_base();

        Ok(base + self.com_direction(segment, angles)? * (fraction * length))
    }

    /// Per-segment CoM table and whole-body CoM
    ///
    /// `coords` and `masses` may be supplied when already computed; `None`
    /// computes them from the model. Supplied tables missing an expected
    /// joint or segment fail with a lookup error.
    pub fn center_of_mass(
        &self,
        angles: &JointAngles,
        coords: Option<&JointCoordinates>,
        masses: Option<&SegmentMasses>,
    ) -> BodyResult<(ComTable, Point)> {
        let computed_coords;
        let coords = match coords {
            Some(coords) => coords,
            None => {
                computed_coords = self.joint_coordinates(angles);
                &computed_coords
            }
        };

        let computed_masses;
        let masses = match masses {
            Some(masses) => masses,
            None => {
                computed_masses = self.segment_masses();
                &computed_masses
            }
        };

        let rows = self
            .segments()
            .into_iter()
            .map(|segment| {
                Ok(SegmentCom {
                    segment,
                    mass: masses.get(segment)?,
                    com: self.segment_com(segment, angles, coords)?,
                })
            })
            .collect::<BodyResult<Vec<_>>>()?;
        let table = ComTable { rows };

        let body_com = table.weighted_sum() / self.body_mass();
        debug!("body CoM for {angles:?}: ({:.5}, {:.5}) m", body_com.x, body_com.y);

        Ok((table, body_com))
    }

    /// Whole-body CoM only
    pub fn center_of_mass_at(&self, angles: &JointAngles) -> BodyResult<Point> {
        self.center_of_mass(angles, None, None).map(|(_, com)| com)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bodycore::{BodyParameters, ComOrigin, Joint, SegmentRatios};

    fn params() -> BodyParameters {
        BodyParameters::new(62.0, 0.2286, 0.5715, 0.4191, 0.381, 0.7366)
    }

    #[test]
    fn test_upright_segment_coms() {
        let model = BodyModel::new(params()).unwrap();
        let (table, _) = model.center_of_mass(&JointAngles::default(), None, None).unwrap();

        let leg = table.get(Segment::Leg).unwrap();
        assert_abs_diff_eq!(leg.com.x, 0.0);
        assert_abs_diff_eq!(leg.com.y, 0.567 * 0.381, epsilon = 1e-12);

        let femur = table.get(Segment::Femur).unwrap();
        assert_abs_diff_eq!(femur.com.y, 0.381 + 0.567 * 0.4191, epsilon = 1e-12);

        let trunk = table.get(Segment::TrunkHeadNeck).unwrap();
        assert_abs_diff_eq!(trunk.com.y, 0.381 + 0.4191 + 0.34 * 0.8001, epsilon = 1e-12);

        let arms = table.get(Segment::Arms).unwrap();
        assert_abs_diff_eq!(arms.com.y, 0.381 + 0.4191 + 0.5715 + 0.47 * 0.7366, epsilon = 1e-12);
    }

    #[test]
    fn test_foot_com_follows_foot_geometry() {
        let model = BodyModel::new(params().with_foot(0.142, 0.08)).unwrap();

        // Leg angle must not move the foot CoM
        for leg in [0.0, 38.0, 70.0] {
            let angles = JointAngles::new(leg, -95.0, 30.0, 180.0);
            let coords = model.joint_coordinates(&angles);
            let foot = model.segment_com(Segment::Foot, &angles, &coords).unwrap();
            assert_abs_diff_eq!(foot.x, 0.5 * 0.142, epsilon = 1e-12);
            assert_abs_diff_eq!(foot.y, -0.5 * 0.08, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_trunk_ignores_head_neck_angle() {
        // Head-neck only lengthens the trunk; it has no angle of its own
        let model = BodyModel::new(params()).unwrap();
        let angles = JointAngles::new(0.0, 0.0, 30.0, 0.0);
        let coords = model.joint_coordinates(&angles);
        let hip = coords.get(Joint::Hip).unwrap();
        let trunk = model.segment_com(Segment::TrunkHeadNeck, &angles, &coords).unwrap();

        let offset = trunk - hip;
        assert_abs_diff_eq!(offset.x, 0.34 * 0.8001 * 30f64.to_radians().sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(offset.y, 0.34 * 0.8001 * 30f64.to_radians().cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_com_origin_tip() {
        let table = bodycore::AnthropometricTable::default()
            .with_ratios(Segment::Leg, SegmentRatios::new(0.0465, 0.433).measured_from(ComOrigin::Tip));
        let model = BodyModel::with_table(params(), table).unwrap();
        let angles = JointAngles::default();
        let coords = model.joint_coordinates(&angles);

        let leg = model.segment_com(Segment::Leg, &angles, &coords).unwrap();
        assert_abs_diff_eq!(leg.y, 0.567 * 0.381, epsilon = 1e-12);
    }

    #[test]
    fn test_body_com_divides_by_body_mass() {
        let model = BodyModel::new(params()).unwrap();
        let (table, com) = model.center_of_mass(&JointAngles::default(), None, None).unwrap();

        let expected = table.weighted_sum() / 62.0;
        assert_eq!(com, expected);
        assert!(table.total_mass() < 62.0);
    }

    #[test]
    fn test_supplied_tables_are_used() {
        let model = BodyModel::new(params()).unwrap();
        let angles = JointAngles::new(10.0, -20.0, 15.0, 5.0);

        let mut masses = model.segment_masses();
        masses.insert(Segment::Arms, 0.0);
        let (table, _) = model.center_of_mass(&angles, None, Some(&masses)).unwrap();
        assert_eq!(table.get(Segment::Arms).unwrap().mass, 0.0);

        let mut coords = model.joint_coordinates(&angles);
        coords.insert(Joint::Shoulder, Point::new(1.0, 2.0));
        let (table, _) = model.center_of_mass(&angles, Some(&coords), None).unwrap();
        let arms = table.get(Segment::Arms).unwrap();
        assert_abs_diff_eq!(arms.com.x, 1.0 + 0.47 * 0.7366 * 5f64.to_radians().sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_missing_segment_mass_fails() {
        let model = BodyModel::new(params()).unwrap();
        let mut masses = model.segment_masses();
        masses.remove(Segment::Femur);

        let err = model
            .center_of_mass(&JointAngles::default(), None, Some(&masses))
            .unwrap_err();
        assert!(matches!(err, BodyError::MissingSegment(Segment::Femur)));
    }
}
