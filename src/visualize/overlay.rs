use crate::image::ImageF32;
use image::{Rgb, RgbImage};

const FIELD_GAIN: f32 = 1024.0;
const EVIDENCE_GAIN: f32 = 200.0;

/// Colour overlay of the evidence field on the attraction field.
///
/// Red marks the negative halo, green the evidence, blue the positive core.
/// Pixels outside `expectation` count as zero attraction.
pub fn overlay_fields(observation: &ImageF32, expectation: &ImageF32) -> RgbImage {
    let (w, h) = (observation.w, observation.h);
    let mut out = RgbImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let e = if x < expectation.w && y < expectation.h {
                expectation.get(x, y)
            } else {
                0.0
            };
            let red = saturate((-e).max(0.0) * FIELD_GAIN);
            let green = saturate(observation.get(x, y) * EVIDENCE_GAIN);
            let blue = saturate(e.max(0.0) * FIELD_GAIN);
            out.put_pixel(x as u32, y as u32, Rgb([red, green, blue]));
        }
    }
    out
}

#[inline]
fn saturate(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
