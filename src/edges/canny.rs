//! Canny edge detector producing a binary mask.
//!
//! Non-maximum suppression compares each magnitude with its two neighbours
//! along the gradient direction quantised to 0°, 45°, 90° or 135°. Samples
//! outside the image count as zero magnitude. A pixel survives when it is
//! strictly greater than the "backward" neighbour and not smaller than the
//! "forward" one, which keeps exactly one pixel of a two-pixel-wide ridge.
//! Hysteresis seeds from pixels above `high` and grows through 8-connected
//! pixels above `low`.
use super::grad::sobel_gradients;
use crate::image::{ImageF32, ImageView};
use serde::Deserialize;

const TAN_22_5_DEG: f32 = 0.414_213_56;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct CannyParams {
    pub low: f32,
    pub high: f32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low: 40.0,
            high: 120.0,
        }
    }
}

/// Run Canny on an image in the 0..=255 intensity range.
///
/// Returns a mask with `1.0` on edge pixels and `0.0` elsewhere.
pub fn canny(l: &ImageF32, params: CannyParams) -> ImageF32 {
    let (w, h) = (l.w, l.h);
    let mut mask = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return mask;
    }
    let grad = sobel_gradients(l);
    let mag_at = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
            0.0
        } else {
            grad.mag.get(x as usize, y as usize)
        }
    };

    // 0 = suppressed, 1 = weak candidate, 2 = strong seed
    let mut class = vec![0u8; w * h];
    let mut stack = Vec::new();
    for y in 0..h {
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        let mag_row = grad.mag.row(y);
        for x in 0..w {
            let m = mag_row[x];
            if m <= params.low {
                continue;
            }
            let (gx, gy) = (gx_row[x], gy_row[x]);
            let (ax, ay) = (gx.abs(), gy.abs());
            let (xi, yi) = (x as isize, y as isize);
            let (back, fwd) = if ay <= ax * TAN_22_5_DEG {
                (mag_at(xi - 1, yi), mag_at(xi + 1, yi))
            } else if ax <= ay * TAN_22_5_DEG {
                (mag_at(xi, yi - 1), mag_at(xi, yi + 1))
            } else if (gx >= 0.0) == (gy >= 0.0) {
                (mag_at(xi - 1, yi - 1), mag_at(xi + 1, yi + 1))
            } else {
                (mag_at(xi + 1, yi - 1), mag_at(xi - 1, yi + 1))
            };
            if m > back && m >= fwd {
                let idx = y * w + x;
                if m > params.high {
                    class[idx] = 2;
                    stack.push(idx);
                } else {
                    class[idx] = 1;
                }
            }
        }
    }

    while let Some(idx) = stack.pop() {
        mask.data[idx] = 1.0;
        let (x, y) = ((idx % w) as isize, (idx / w) as isize);
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let n = ny as usize * w + nx as usize;
                if class[n] == 1 {
                    class[n] = 2;
                    stack.push(n);
                }
            }
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(mask: &ImageF32) -> usize {
        mask.data.iter().filter(|&&v| v > 0.0).count()
    }

    #[test]
    fn uniform_image_has_no_edges() {
        let img = ImageF32::from_fn(20, 10, |_, _| 128.0);
        assert_eq!(count(&canny(&img, CannyParams::default())), 0);
    }

    #[test]
    fn step_edge_gives_thin_line() {
        let img = ImageF32::from_fn(20, 10, |x, _| if x >= 10 { 200.0 } else { 0.0 });
        let mask = canny(&img, CannyParams::default());
        for y in 0..mask.h {
            let cols: Vec<usize> = (0..mask.w).filter(|&x| mask.get(x, y) > 0.0).collect();
            assert_eq!(cols, vec![9], "row {y}");
        }
    }

    #[test]
    fn weak_edges_need_a_strong_seed() {
        // contrast 20 -> L1 magnitude 80: above low, below high
        let img = ImageF32::from_fn(20, 10, |x, _| if x >= 10 { 20.0 } else { 0.0 });
        assert_eq!(count(&canny(&img, CannyParams::default())), 0);
        let loose = CannyParams {
            low: 40.0,
            high: 60.0,
        };
        assert_eq!(count(&canny(&img, loose)), 10);
    }
}
