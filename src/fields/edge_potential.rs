use crate::edges::{canny, CannyParams};
use crate::filters::gaussian::{force_odd, gaussian_blur};
use crate::image::ImageF32;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgePotentialOptions {
    /// Kernel size of the positive core blur; forced odd. The negative halo
    /// uses `2 * blur - 1` after forcing.
    pub blur: usize,
    pub canny_low: f32,
    pub canny_high: f32,
}

impl Default for EdgePotentialOptions {
    fn default() -> Self {
        Self {
            blur: 40,
            canny_low: 40.0,
            canny_high: 120.0,
        }
    }
}

impl EdgePotentialOptions {
    pub fn canny_params(&self) -> CannyParams {
        CannyParams {
            low: self.canny_low,
            high: self.canny_high,
        }
    }

    /// (core, halo) kernel sizes.
    pub fn kernel_sizes(&self) -> (usize, usize) {
        let core = force_odd(self.blur.max(1));
        (core, 2 * core - 1)
    }
}

/// Difference-of-Gaussians around the Canny edges of `projected`.
///
/// `projected` holds intensities in 0..=255. The result is divided by twice
/// its largest absolute value, so it lies in `[-0.5, 0.5]`. An image without
/// edges yields an all-zero field.
pub fn edge_potential(projected: &ImageF32, options: &EdgePotentialOptions) -> ImageF32 {
    let edges = canny(projected, options.canny_params());
    let (core, halo) = options.kernel_sizes();
    let positive = gaussian_blur(&edges, core);
    let negative = gaussian_blur(&edges, halo);

    let mut field = positive;
    for (p, n) in field.data.iter_mut().zip(&negative.data) {
        *p -= n;
    }

    let max_abs = field.data.iter().fold(0.0f32, |acc, v| acc.max(v.abs()));
    if max_abs > 0.0 {
        let scale = 1.0 / (2.0 * max_abs);
        field.map_in_place(|v| v * scale);
    } else {
        field.map_in_place(|_| 0.0);
    }
    field
}
