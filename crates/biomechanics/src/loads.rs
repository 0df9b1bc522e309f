//! Sequential joint load resolution (foot-inclusive model)
//!
//! Static free-body solution, link by link from the ground up:
//!
//! ```text
//! ground -> ankle -> knee -> hip
//!      foot      leg     femur
//! ```
//!
//! Boundary condition: the ground pushes up with the full body weight along
//! the vertical through the whole-body CoM, with no horizontal component.
//!
//! For each joint `j` with the segment `s` below it and the previous
//! application point `p` carrying force `F_p`:
//!
//! ```text
//! F_j = F_p + (0, m_s·g)
//! M_j = M_p + (r_p - r_j) × F_p + (x_s - x_j)·m_s·g
//! ```
//!
//! `F_j` and `M_j` are the force and moment the segment above `j` exerts on
//! everything below it. Upward forces and counter-clockwise moments are
//! positive.

use bodycore::{
    BodyError, BodyResult, ComTable, GRAVITY, Joint, JointCoordinates, JointLoad, Point, Segment,
};
use log::debug;

use crate::model::BodyModel;

/// Joints resolved, each paired with the segment directly below it
const LOAD_CHAIN: [(Joint, Segment); 3] = [
    (Joint::Ankle, Segment::Foot),
    (Joint::Knee, Segment::Leg),
    (Joint::Hip, Segment::Femur),
];

/// z-component of the planar cross product `r × f`
pub fn cross(r: Point, f: Point) -> f64 {
    r.x * f.y - r.y * f.x
}

impl BodyModel {
    /// Reaction force and moment at the ankle, knee and hip
    ///
    /// Consumes the outputs of [`BodyModel::center_of_mass`] and
    /// [`BodyModel::joint_coordinates`]. Requires a modelled foot.
    pub fn joint_loads(
        &self,
        com_table: &ComTable,
        body_com: &Point,
        coords: &JointCoordinates,
    ) -> BodyResult<Vec<JointLoad>> {
        if !self.has_foot() {
            return Err(BodyError::FootNotModeled);
        }

        let body_weight = self.body_weight();
        let body_mass = self.body_mass();

        // Ground reaction expressed as the load the foot carries from below
        let mut force = Point::new(0.0, -body_weight);
        let mut moment = 0.0;
        let mut application = *body_com;

        let mut loads = Vec::with_capacity(LOAD_CHAIN.len());
        for (joint, segment) in LOAD_CHAIN {
            let position = coords.get(joint)?;
            let row = com_table.get(segment)?;
            let segment_weight = row.mass * GRAVITY;

            moment += cross(application - position, force) + (row.com.x - position.x) * segment_weight;
            force += Point::new(0.0, segment_weight);
            application = position;

            let load = JointLoad {
                joint,
                force,
                moment,
                force_pct_body_weight: force * (100.0 / body_weight),
                moment_per_kg: moment / body_mass,
            };
            debug!(
                "{joint}: Fx={:.2} N, Fy={:.2} N, M={:.2} N·m ({:.1}% BW, {:.3} N·m/kg)",
                load.force.x, load.force.y, load.moment, load.force_pct_body_weight.y, load.moment_per_kg
            );
            loads.push(load);
        }

        Ok(loads)
    }
}
