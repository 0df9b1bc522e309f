//! Anthropometric ratio tables
//!
//! Provides:
//! - Segment mass as a fraction of total body mass
//! - Segment centre-of-mass location as a fraction of segment length
//! - A default table with the literature values used by the body model
//!
//! Tables are plain values handed to the model at construction, so an
//! alternate dataset is swapped in by building a different table.

use serde::{Deserialize, Serialize};

use crate::error::{BodyError, BodyResult};
use crate::types::Segment;

/// End of the segment a centre-of-mass fraction is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComOrigin {
    /// The joint the segment hangs off when walking up from the ankle
    /// (ankle for foot and leg, knee for femur, hip for trunk, shoulder for arms)
    #[default]
    Base,
    /// The far end of the segment
    Tip,
}

/// Mass and centre-of-mass ratios for one segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentRatios {
    /// Segment mass / body mass
    pub mass_ratio: f64,
    /// Distance from `com_origin` to the segment CoM / segment length
    pub com_ratio: f64,
    #[serde(default)]
    pub com_origin: ComOrigin,
}

impl SegmentRatios {
    pub fn new(mass_ratio: f64, com_ratio: f64) -> Self {
        SegmentRatios {
            mass_ratio,
            com_ratio,
            com_origin: ComOrigin::Base,
        }
    }

    /// Measure the CoM fraction from the given end (builder pattern)
    pub fn measured_from(mut self, origin: ComOrigin) -> Self {
        self.com_origin = origin;
        self
    }

    /// Fraction of the segment length between the base joint and the CoM
    pub fn fraction_from_base(&self) -> f64 {
        match self.com_origin {
            ComOrigin::Base => self.com_ratio,
            ComOrigin::Tip => 1.0 - self.com_ratio,
        }
    }
}

/// Ratios for every segment of the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnthropometricTable {
    pub foot: SegmentRatios,
    pub leg: SegmentRatios,
    pub femur: SegmentRatios,
    pub trunk_head_neck: SegmentRatios,
    pub arms: SegmentRatios,
}

impl Default for AnthropometricTable {
    fn default() -> Self {
        AnthropometricTable {
            foot: SegmentRatios::new(0.0145, 0.50),
            leg: SegmentRatios::new(0.0465, 0.567),
            femur: SegmentRatios::new(0.100, 0.567),
            trunk_head_neck: SegmentRatios::new(0.578, 0.34),
            arms: SegmentRatios::new(0.050, 0.470),
        }
    }
}

impl AnthropometricTable {
    /// Create the default literature table
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from JSON
    pub fn from_json_str(json: &str) -> BodyResult<Self> {
        let table: AnthropometricTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn ratios(&self, segment: Segment) -> &SegmentRatios {
        match segment {
            Segment::Foot => &self.foot,
            Segment::Leg => &self.leg,
            Segment::Femur => &self.femur,
            Segment::TrunkHeadNeck => &self.trunk_head_neck,
            Segment::Arms => &self.arms,
        }
    }

    /// Replace the ratios of one segment (builder pattern)
    pub fn with_ratios(mut self, segment: Segment, ratios: SegmentRatios) -> Self {
        let slot = match segment {
            Segment::Foot => &mut self.foot,
            Segment::Leg => &mut self.leg,
            Segment::Femur => &mut self.femur,
            Segment::TrunkHeadNeck => &mut self.trunk_head_neck,
            Segment::Arms => &mut self.arms,
        };
        *slot = ratios;
        self
    }

    /// Sum of the mass ratios over `segments`
    pub fn mass_ratio_sum(&self, segments: &[Segment]) -> f64 {
        segments.iter().map(|s| self.ratios(*s).mass_ratio).sum()
    }

    /// Checks each ratio lies in [0, 1].
    ///
    /// The mass ratios are not required to sum to one; the table only has to
    /// be internally consistent for the segments it is used with.
    pub fn validate(&self) -> BodyResult<()> {
        for segment in Segment::ALL {
            let ratios = self.ratios(segment);
            for (label, value) in [("mass_ratio", ratios.mass_ratio), ("com_ratio", ratios.com_ratio)] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(BodyError::InvalidRatio {
                        segment,
                        message: format!("{label} = {value} outside [0, 1]"),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_mass_ratios() {
        let table = AnthropometricTable::default();
        assert_abs_diff_eq!(table.mass_ratio_sum(&Segment::ALL), 0.789, epsilon = 1e-12);
        assert!(table.mass_ratio_sum(&Segment::ALL) <= 1.0);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_fraction_from_tip() {
        let ratios = SegmentRatios::new(0.1, 0.433).measured_from(ComOrigin::Tip);
        assert_abs_diff_eq!(ratios.fraction_from_base(), 0.567, epsilon = 1e-12);
    }

    #[test]
    fn test_with_ratios_replaces_one_segment() {
        let table = AnthropometricTable::default().with_ratios(Segment::Arms, SegmentRatios::new(0.06, 0.5));
        assert_eq!(table.arms.mass_ratio, 0.06);
        assert_eq!(table.leg, AnthropometricTable::default().leg);
    }

    #[test]
    fn test_from_json_rejects_out_of_range() {
        let mut json = serde_json::to_value(AnthropometricTable::default()).unwrap();
        json["femur"]["com_ratio"] = serde_json::json!(1.5);

        let err = AnthropometricTable::from_json_str(&json.to_string()).unwrap_err();
        assert!(matches!(err, BodyError::InvalidRatio { segment: Segment::Femur, .. }));
    }

    #[test]
    fn test_from_json_defaults_origin() {
        let json = r#"{
            "foot": {"mass_ratio": 0.0145, "com_ratio": 0.5},
            "leg": {"mass_ratio": 0.0465, "com_ratio": 0.433, "com_origin": "tip"},
            "femur": {"mass_ratio": 0.1, "com_ratio": 0.567},
            "trunk_head_neck": {"mass_ratio": 0.578, "com_ratio": 0.34},
            "arms": {"mass_ratio": 0.05, "com_ratio": 0.47}
        }"#;
        let table = AnthropometricTable::from_json_str(json).unwrap();
        assert_eq!(table.foot.com_origin, ComOrigin::Base);
        assert_eq!(table.leg.com_origin, ComOrigin::Tip);
    }
}
