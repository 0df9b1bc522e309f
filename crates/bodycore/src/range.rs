//! Sample counts for stepped parameter sweeps

/// Upper bound on the samples a single sweep range may produce
pub const MAX_RANGE_SAMPLES: usize = 100_000;

/// Number of values `start, start + step, ...` visits before reaching `end`
/// (exclusive), or `None` if the walk would not finish.
///
/// A walk does not finish when a bound or the step is not finite, when the
/// step heads away from `end`, or when the step is too small to change
/// either bound. Walks longer than [`MAX_RANGE_SAMPLES`] are refused too.
pub fn range_samples(start: f64, end: f64, step: f64) -> Option<usize> {
    if !(start.is_finite() && end.is_finite() && step.is_finite()) {
        return None;
    }
    if start + step == start || end - step == end {
        return None;
    }
    let samples = ((end - start) / step).ceil();
    if (0.0..=MAX_RANGE_SAMPLES as f64).contains(&samples) {
        Some(samples as usize)
    } else {
        None
    }
}
