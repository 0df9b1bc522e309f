use bodycore::SegmentMasses;
use log::debug;

use crate::model::BodyModel;

impl BodyModel {
    /// Segment masses (kg) from the anthropometric mass ratios
    ///
    /// Depends on body mass only; segment lengths and angles play no part.
    pub fn segment_masses(&self) -> SegmentMasses {
        let body_mass = self.body_mass();
        let masses: SegmentMasses = self
            .segments()
            .into_iter()
            .map(|segment| (segment, self.table().ratios(segment).mass_ratio * body_mass))
            .collect();

        debug!("segment masses: {masses:?}");
        masses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bodycore::{AnthropometricTable, BodyParameters, Segment, SegmentRatios};

    fn params() -> BodyParameters {
        BodyParameters::new(62.0, 0.2286, 0.5715, 0.4191, 0.381, 0.7366)
    }

    #[test]
    fn test_reference_masses() {
        let masses = BodyModel::new(params().with_foot(0.142, 0.08)).unwrap().segment_masses();

        assert_eq!(masses.len(), 5);
        assert_relative_eq!(masses.get(Segment::Foot).unwrap(), 0.899, epsilon = 1e-9);
        assert_relative_eq!(masses.get(Segment::Leg).unwrap(), 2.883, epsilon = 1e-9);
        assert_relative_eq!(masses.get(Segment::Femur).unwrap(), 6.2, epsilon = 1e-9);
        assert_relative_eq!(masses.get(Segment::TrunkHeadNeck).unwrap(), 35.836, epsilon = 1e-9);
        assert_relative_eq!(masses.get(Segment::Arms).unwrap(), 3.1, epsilon = 1e-9);
    }

    #[test]
    fn test_masses_ignore_lengths() {
        let short = BodyModel::new(params()).unwrap().segment_masses();
        let long = BodyModel::new(params().with_femur_length(0.55)).unwrap().segment_masses();
        assert_eq!(short, long);
    }

    #[test]
    fn test_alternate_table() {
        let table = AnthropometricTable::default().with_ratios(Segment::Arms, SegmentRatios::new(0.1, 0.47));
        let model = BodyModel::with_table(params(), table).unwrap();
        assert_relative_eq!(model.segment_masses().get(Segment::Arms).unwrap(), 6.2, epsilon = 1e-9);
    }
}
