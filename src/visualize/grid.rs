//! 3×3 mosaic of the baseline field and its translational candidates.
//!
//! ```text
//!   z-  y-  .
//!   x-  B   x+
//!   .   y+  z+
//! ```
//!
//! Each tile carries a bar in its lower-left corner whose height is the
//! tile's score in pixels, clamped to the tile height. The mosaic is
//! resampled back to a single tile's size.
use crate::image::{ImageF32, ImageView};
use crate::refine::{Axis, CandidateSet, Direction};

const BAR_WIDTH_FRACTION: f64 = 0.05;

#[derive(Clone, Copy)]
enum Tile {
    Baseline,
    Candidate(Axis, Direction),
}

const LAYOUT: [(Tile, usize, usize); 7] = [
    (Tile::Baseline, 1, 1),
    (Tile::Candidate(Axis::X, Direction::Negative), 0, 1),
    (Tile::Candidate(Axis::X, Direction::Positive), 2, 1),
    (Tile::Candidate(Axis::Y, Direction::Negative), 1, 0),
    (Tile::Candidate(Axis::Y, Direction::Positive), 1, 2),
    (Tile::Candidate(Axis::Z, Direction::Negative), 0, 0),
    (Tile::Candidate(Axis::Z, Direction::Positive), 2, 2),
];

/// Compose the candidate mosaic at `w × h`.
///
/// Without a baseline the result is a blank `w × h` image.
pub fn compose_candidate_grid(
    w: usize,
    h: usize,
    baseline: Option<(&ImageF32, f64)>,
    candidates: Option<&CandidateSet>,
) -> ImageF32 {
    let Some((baseline_field, baseline_score)) = baseline else {
        return ImageF32::new(w, h);
    };
    if w == 0 || h == 0 {
        return ImageF32::new(w, h);
    }

    let mut joined = ImageF32::new(3 * w, 3 * h);
    for (tile, col, row) in LAYOUT {
        let (field, score) = match tile {
            Tile::Baseline => (baseline_field, baseline_score),
            Tile::Candidate(axis, direction) => match candidates {
                Some(set) => {
                    let c = set.get(axis, direction);
                    (&c.image, c.score)
                }
                None => continue,
            },
        };
        let mut tile_img = if field.dims() == (w, h) {
            field.clone()
        } else {
            ImageF32::new(w, h)
        };
        draw_score_bar(&mut tile_img, score);
        joined.blit(&tile_img, col * w, row * h);
    }

    resize_bilinear(&joined, w, h)
}

/// Paint a bar of height `score` pixels (clamped to `[0, h]`) at the
/// bottom-left of `image`.
pub fn draw_score_bar(image: &mut ImageF32, score: f64) {
    let (w, h) = (image.w, image.h);
    let height = if score.is_finite() {
        score.clamp(0.0, h as f64) as usize
    } else {
        0
    };
    let width = ((w as f64 * BAR_WIDTH_FRACTION).ceil() as usize).min(w);
    for j in 0..height {
        let y = h - j - 1;
        for x in 0..width {
            image.set(x, y, 1.0);
        }
    }
}

/// Pixel-centre aligned bilinear resampling.
fn resize_bilinear(src: &ImageF32, w: usize, h: usize) -> ImageF32 {
    let mut out = ImageF32::new(w, h);
    if src.w == 0 || src.h == 0 || w == 0 || h == 0 {
        return out;
    }
    let sx_scale = src.w as f64 / w as f64;
    let sy_scale = src.h as f64 / h as f64;
    for y in 0..h {
        let sy = ((y as f64 + 0.5) * sy_scale - 0.5).max(0.0);
        let y0 = (sy.floor() as usize).min(src.h - 1);
        let y1 = (y0 + 1).min(src.h - 1);
        let fy = (sy - y0 as f64) as f32;
        for x in 0..w {
            let sx = ((x as f64 + 0.5) * sx_scale - 0.5).max(0.0);
            let x0 = (sx.floor() as usize).min(src.w - 1);
            let x1 = (x0 + 1).min(src.w - 1);
            let fx = (sx - x0 as f64) as f32;
            let top = src.get(x0, y0) + (src.get(x1, y0) - src.get(x0, y0)) * fx;
            let bottom = src.get(x0, y1) + (src.get(x1, y1) - src.get(x0, y1)) * fx;
            out.set(x, y, top + (bottom - top) * fy);
        }
    }
    out
}
