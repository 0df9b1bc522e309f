//! Body model - segment chain for one individual
//!
//! Bundles the per-individual parameters with the anthropometric table they
//! are evaluated against. Every query is a pure function of this immutable
//! state and the joint angles passed in.

use bodycore::{AnthropometricTable, BodyParameters, BodyResult, Segment};
use log::info;

/// Sagittal-plane body model
#[derive(Debug, Clone, PartialEq)]
pub struct BodyModel {
    params: BodyParameters,
    table: AnthropometricTable,
}

impl BodyModel {
    /// Create a model using the default anthropometric table
    ///
    /// Fails if any mass or length is not strictly positive.
    pub fn new(params: BodyParameters) -> BodyResult<Self> {
        Self::with_table(params, AnthropometricTable::default())
    }

    /// Create a model evaluated against an alternate anthropometric table
    pub fn with_table(params: BodyParameters, table: AnthropometricTable) -> BodyResult<Self> {
        params.validate()?;
        table.validate()?;
        info!("{params}");
        Ok(BodyModel { params, table })
    }

    pub fn params(&self) -> &BodyParameters {
        &self.params
    }

    pub fn table(&self) -> &AnthropometricTable {
        &self.table
    }

    pub fn has_foot(&self) -> bool {
        self.params.has_foot()
    }

    /// Segments this model carries, distal to proximal
    pub fn segments(&self) -> Vec<Segment> {
        self.params.segments()
    }

    pub fn body_mass(&self) -> f64 {
        self.params.body_mass
    }

    /// Body weight (N)
    pub fn body_weight(&self) -> f64 {
        self.params.body_weight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodycore::BodyError;

    #[test]
    fn test_new_validates_parameters() {
        let params = BodyParameters::new(62.0, 0.2286, 0.5715, 0.4191, -0.381, 0.7366);
        let err = BodyModel::new(params).unwrap_err();
        assert!(matches!(err, BodyError::InvalidParameter { name: "leg_length", .. }));
    }

    #[test]
    fn test_segments_with_and_without_foot() {
        let params = BodyParameters::new(62.0, 0.2286, 0.5715, 0.4191, 0.381, 0.7366);
        let reduced = BodyModel::new(params).unwrap();
        let extended = BodyModel::new(params.with_foot(0.142, 0.08)).unwrap();

        assert!(!reduced.has_foot());
        assert_eq!(reduced.segments(), vec![Segment::Leg, Segment::Femur, Segment::TrunkHeadNeck, Segment::Arms]);
        assert_eq!(extended.segments().first(), Some(&Segment::Foot));
        assert!((extended.body_weight() - 62.0 * 9.81).abs() < 1e-10);
    }
}
