//! Owned single-channel f32 image in row-major layout (stride == width).
use super::{ImageView, ImageViewMut};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order, `w * h` values
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Zero-initialised buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap an existing buffer; `data.len()` must equal `w * h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), w * h, "buffer length does not match {w}x{h}");
        Self { w, h, data }
    }

    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { w, h, data }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Sample with coordinates clamped to the image extents (replicated border).
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> f32 {
        let xc = x.clamp(0, self.w as isize - 1) as usize;
        let yc = y.clamp(0, self.h as isize - 1) as usize;
        self.get(xc, yc)
    }

    /// Smallest and largest finite sample, or `None` for an empty image.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    pub fn map_in_place(&mut self, f: impl Fn(f32) -> f32) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Copy `src` into this image with its top-left corner at `(x0, y0)`.
    ///
    /// Pixels falling outside the destination are dropped.
    pub fn blit(&mut self, src: &ImageF32, x0: usize, y0: usize) {
        if x0 >= self.w || y0 >= self.h {
            return;
        }
        let cols = src.w.min(self.w - x0);
        let rows = src.h.min(self.h - y0);
        for y in 0..rows {
            let dst_start = self.idx(x0, y0 + y);
            self.data[dst_start..dst_start + cols].copy_from_slice(&src.row(y)[..cols]);
        }
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_clips_to_destination() {
        let mut dst = ImageF32::new(4, 3);
        let src = ImageF32::from_fn(3, 3, |x, y| (x + 10 * y) as f32);
        dst.blit(&src, 2, 1);
        assert_eq!(dst.get(2, 1), 0.0);
        assert_eq!(dst.get(3, 1), 1.0);
        assert_eq!(dst.get(3, 2), 11.0);
        assert_eq!(dst.get(1, 1), 0.0);
    }

    #[test]
    fn min_max_of_empty_is_none() {
        assert!(ImageF32::new(0, 0).min_max().is_none());
        let img = ImageF32::from_vec(3, 1, vec![2.0, -1.0, 5.0]);
        assert_eq!(img.min_max(), Some((-1.0, 5.0)));
    }
}
