//! Forward affine maps and bilinear warping with replicated borders.
//!
//! An [`AffineMap`] maps source pixel coordinates to destination
//! coordinates. [`warp_affine`] walks the destination grid, pulls each sample
//! back through the inverse map and interpolates bilinearly. Samples outside
//! the source repeat the nearest border pixel.
use crate::image::{for_each_row_mut, ImageF32};
use nalgebra::{Matrix2, Matrix2x3, Vector2};

const SINGULAR_EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineMap {
    pub m: Matrix2x3<f64>,
}

impl AffineMap {
    pub fn identity() -> Self {
        Self::translation(0.0, 0.0)
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            m: Matrix2x3::new(1.0, 0.0, tx, 0.0, 1.0, ty),
        }
    }

    /// Isotropic scale by `s` keeping `(cx, cy)` fixed.
    pub fn scale_about(cx: f64, cy: f64, s: f64) -> Self {
        Self {
            m: Matrix2x3::new(s, 0.0, (1.0 - s) * cx, 0.0, s, (1.0 - s) * cy),
        }
    }

    fn linear(&self) -> Matrix2<f64> {
        self.m.fixed_view::<2, 2>(0, 0).into_owned()
    }

    fn offset(&self) -> Vector2<f64> {
        self.m.column(2).into_owned()
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.linear() * Vector2::new(x, y) + self.offset();
        (p.x, p.y)
    }

    /// Inverse map, or `None` when the linear part is (near) singular.
    pub fn inverse(&self) -> Option<Self> {
        let a = self.linear();
        if a.determinant().abs() < SINGULAR_EPS {
            return None;
        }
        let inv = a.try_inverse()?;
        let t = -(inv * self.offset());
        Some(Self {
            m: Matrix2x3::new(
                inv[(0, 0)],
                inv[(0, 1)],
                t.x,
                inv[(1, 0)],
                inv[(1, 1)],
                t.y,
            ),
        })
    }
}

/// Warp `src` by `map` into an image of the same size.
///
/// A singular map collapses the whole image onto one source point; the
/// output is then filled with the sample nearest to the map's offset.
pub fn warp_affine(src: &ImageF32, map: &AffineMap) -> ImageF32 {
    let mut dst = ImageF32::new(src.w, src.h);
    if src.w == 0 || src.h == 0 {
        return dst;
    }
    let Some(inv) = map.inverse() else {
        let (tx, ty) = map.apply(0.0, 0.0);
        let v = src.get_clamped(tx.round() as isize, ty.round() as isize);
        dst.map_in_place(|_| v);
        return dst;
    };

    let m = inv.m;
    for_each_row_mut(&mut dst, |y, row| {
        let yf = y as f64;
        let base_x = m[(0, 1)] * yf + m[(0, 2)];
        let base_y = m[(1, 1)] * yf + m[(1, 2)];
        for (x, out) in row.iter_mut().enumerate() {
            let xf = x as f64;
            let sx = m[(0, 0)] * xf + base_x;
            let sy = m[(1, 0)] * xf + base_y;
            *out = sample_bilinear(src, sx, sy);
        }
    });
    dst
}

#[inline]
fn sample_bilinear(src: &ImageF32, sx: f64, sy: f64) -> f32 {
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = (sx - x0) as f32;
    let fy = (sy - y0) as f32;
    let (xi, yi) = (x0 as isize, y0 as isize);

    let p00 = src.get_clamped(xi, yi);
    let p10 = src.get_clamped(xi + 1, yi);
    let p01 = src.get_clamped(xi, yi + 1);
    let p11 = src.get_clamped(xi + 1, yi + 1);

    let top = p00 + (p10 - p00) * fx;
    let bottom = p01 + (p11 - p01) * fx;
    top + (bottom - top) * fy
}
