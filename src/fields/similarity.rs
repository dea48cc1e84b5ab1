use crate::image::{ImageF32, ImageView};

/// Sum of the elementwise product of `observation` and `expectation`.
///
/// No normalisation is applied, so scores are only comparable between
/// images of identical size. Mismatched sizes are a caller bug.
pub fn similarity_score(observation: &ImageF32, expectation: &ImageF32) -> f64 {
    debug_assert!(
        observation.same_size(expectation) || observation.is_empty() || expectation.is_empty(),
        "similarity on mismatched images {}x{} vs {}x{}",
        observation.w,
        observation.h,
        expectation.w,
        expectation.h
    );
    observation
        .data
        .iter()
        .zip(&expectation.data)
        .map(|(&o, &e)| o as f64 * e as f64)
        .sum()
}
