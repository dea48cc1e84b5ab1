//! Separable smoothing filters.
//!
//! Kernels follow the OpenCV conventions the tracker was tuned against: an
//! odd kernel size selects the taps, the sigma is derived from the size when
//! not given, and samples outside the image are mirrored without repeating
//! the edge pixel (reflect-101).

pub mod gaussian;

pub use gaussian::{gaussian_blur, GaussianKernel};

use crate::image::{for_each_row_mut, ImageF32, ImageView};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order), odd length, centre at `len / 2`.
    fn taps(&self) -> &[f32];
}

/// Mirror an out-of-range index back into `0..len` (`gfedcb|abcdefgh|gfedcba`).
#[inline]
pub fn reflect_101(mut idx: isize, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    let last = len as isize - 1;
    loop {
        if idx < 0 {
            idx = -idx;
        } else if idx > last {
            idx = 2 * last - idx;
        } else {
            return idx as usize;
        }
    }
}

/// Apply `filter` horizontally then vertically with reflect-101 borders.
pub fn apply_separable(filter: &dyn SeparableFilter, src: &ImageF32) -> ImageF32 {
    let taps = filter.taps();
    assert!(
        taps.len() % 2 == 1,
        "separable filter needs an odd number of taps"
    );
    if src.w == 0 || src.h == 0 {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;
    let (w, h) = (src.w, src.h);

    let mut horiz = ImageF32::new(w, h);
    let cols: Vec<Vec<usize>> = (0..w as isize)
        .map(|x| {
            (-radius..=radius)
                .map(|k| reflect_101(x + k, w))
                .collect()
        })
        .collect();
    for_each_row_mut(&mut horiz, |y, dst| {
        let row = src.row(y);
        for (x, out) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (&tap, &sx) in taps.iter().zip(&cols[x]) {
                acc += tap * row[sx];
            }
            *out = acc;
        }
    });

    let mut out = ImageF32::new(w, h);
    for_each_row_mut(&mut out, |y, dst| {
        for (k, &tap) in taps.iter().enumerate() {
            let sy = reflect_101(y as isize + k as isize - radius, h);
            for (o, &v) in dst.iter_mut().zip(horiz.row(sy)) {
                *o += tap * v;
            }
        }
    });
    out
}
