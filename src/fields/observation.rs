use crate::filters::gaussian::{force_odd, gaussian_blur};
use crate::image::ImageF32;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObservationOptions {
    /// Smoothing kernel size (forced odd).
    pub blur: usize,
}

impl Default for ObservationOptions {
    fn default() -> Self {
        Self { blur: 7 }
    }
}

/// Smooth the event surface and stretch it to `[0, 1]`.
///
/// A surface with no intensity range maps to all zeros.
pub fn observation_field(surface: &ImageF32, options: &ObservationOptions) -> ImageF32 {
    let mut field = gaussian_blur(surface, force_odd(options.blur.max(1)));
    let Some((lo, hi)) = field.min_max() else {
        return field;
    };
    let range = hi - lo;
    if range > f32::EPSILON {
        let inv = 1.0 / range;
        field.map_in_place(|v| (v - lo) * inv);
    } else {
        field.map_in_place(|_| 0.0);
    }
    field
}
