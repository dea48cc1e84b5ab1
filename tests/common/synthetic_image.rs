#![allow(dead_code)]

use event_pose::edges::{canny, CannyParams};
use event_pose::image::ImageF32;
use event_pose::CameraIntrinsics;

pub fn vga() -> CameraIntrinsics {
    CameraIntrinsics {
        width: 640,
        height: 480,
        cx: 320.0,
        cy: 240.0,
        fx: 500.0,
        fy: 500.0,
    }
}

/// Bright axis-aligned rectangle `[x0, x1) × [y0, y1)` on black, 0..=255.
pub fn rectangle_f32(
    width: usize,
    height: usize,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
) -> ImageF32 {
    assert!(x0 < x1 && x1 <= width, "bad x range");
    assert!(y0 < y1 && y1 <= height, "bad y range");
    ImageF32::from_fn(width, height, |x, y| {
        if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
            255.0
        } else {
            0.0
        }
    })
}

/// Event-like surface: Canny edges of `img` scaled to 0..=255.
pub fn edge_surface_f32(img: &ImageF32) -> ImageF32 {
    let mut mask = canny(img, CannyParams::default());
    mask.map_in_place(|v| v * 255.0);
    mask
}
