use bodycore::{BodyResult, ComTable, JointAngles, JointCoordinates, JointLoad, Point, SegmentMasses};
use serde::Serialize;

use crate::model::BodyModel;

/// Every query result for one posture, in a serialisable bundle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostureAnalysis {
    pub angles: JointAngles,
    pub coordinates: JointCoordinates,
    pub masses: SegmentMasses,
    pub com_table: ComTable,
    pub body_com: Point,
    /// Empty for a model without a foot
    pub joint_loads: Vec<JointLoad>,
}

impl BodyModel {
    /// Run kinematics, CoM aggregation and, when the foot is modelled,
    /// joint load resolution for one posture
    pub fn analyze(&self, angles: &JointAngles) -> BodyResult<PostureAnalysis> {
        let coordinates = self.joint_coordinates(angles);
        let masses = self.segment_masses();
        let (com_table, body_com) = self.center_of_mass(angles, Some(&coordinates), Some(&masses))?;
        let joint_loads = if self.has_foot() {
            self.joint_loads(&com_table, &body_com, &coordinates)?
        } else {
            Vec::new()
        };

        Ok(PostureAnalysis {
            angles: *angles,
            coordinates,
            masses,
            com_table,
            body_com,
            joint_loads,
        })
    }
}
