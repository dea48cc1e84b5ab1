use super::{apply_separable, SeparableFilter};
use crate::image::ImageF32;

// Fixed small kernels used when no sigma is supplied (sizes 1, 3, 5, 7).
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
    ],
];

/// Normalised 1D Gaussian kernel of odd size.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f32>,
    sigma: f64,
}

impl GaussianKernel {
    /// Kernel of size `ksize` with sigma derived from the size.
    ///
    /// Even sizes are bumped to the next odd value.
    pub fn new(ksize: usize) -> Self {
        let ksize = force_odd(ksize);
        let sigma = sigma_for_size(ksize);
        if let Some(taps) = SMALL_KERNELS.get(ksize / 2) {
            return Self {
                taps: taps.to_vec(),
                sigma,
            };
        }
        Self::with_sigma(ksize, sigma)
    }

    pub fn with_sigma(ksize: usize, sigma: f64) -> Self {
        let ksize = force_odd(ksize);
        let center = (ksize / 2) as f64;
        let scale = -0.5 / (sigma * sigma);
        let raw: Vec<f64> = (0..ksize)
            .map(|i| {
                let x = i as f64 - center;
                (scale * x * x).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        Self {
            taps: raw.iter().map(|v| (v / sum) as f32).collect(),
            sigma,
        }
    }

    pub fn size(&self) -> usize {
        self.taps.len()
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Isotropic Gaussian blur with an odd `ksize × ksize` kernel.
pub fn gaussian_blur(src: &ImageF32, ksize: usize) -> ImageF32 {
    apply_separable(&GaussianKernel::new(ksize), src)
}

#[inline]
pub fn force_odd(ksize: usize) -> usize {
    if ksize % 2 == 1 {
        ksize
    } else {
        ksize + 1
    }
}

fn sigma_for_size(ksize: usize) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    #[test]
    fn kernels_are_normalised_and_symmetric() {
        for ksize in [1usize, 3, 7, 9, 41, 81] {
            let k = GaussianKernel::new(ksize);
            assert_eq!(k.size(), ksize);
            let sum: f32 = k.taps().iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "ksize={ksize} sum={sum}");
            let taps = k.taps();
            for i in 0..ksize / 2 {
                assert!((taps[i] - taps[ksize - 1 - i]).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn even_sizes_are_bumped() {
        assert_eq!(GaussianKernel::new(40).size(), 41);
        let k = GaussianKernel::new(41);
        assert!((k.sigma() - 6.5).abs() < 1e-9, "sigma={}", k.sigma());
    }

    #[test]
    fn blur_preserves_constant_image() {
        let img = ImageF32::from_fn(13, 9, |_, _| 3.0);
        let out = gaussian_blur(&img, 7);
        for y in 0..out.h {
            for &v in out.row(y) {
                assert!((v - 3.0).abs() < 1e-5, "v={v}");
            }
        }
    }

    #[test]
    fn blur_spreads_impulse() {
        let mut img = ImageF32::new(11, 11);
        img.set(5, 5, 1.0);
        let out = gaussian_blur(&img, 3);
        assert!((out.get(5, 5) - 0.25).abs() < 1e-6);
        assert!((out.get(4, 5) - 0.125).abs() < 1e-6);
        assert!((out.get(4, 4) - 0.0625).abs() < 1e-6);
        assert_eq!(out.get(0, 0), 0.0);
    }
}
