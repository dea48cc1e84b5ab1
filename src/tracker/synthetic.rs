//! Synthetic collaborators for demos and tests.
//!
//! The scene is a single sphere seen by a pinhole camera looking down `-z`.
//! Under that model a sphere of radius `R` at depth `d = -z` projects to a
//! disc centred at `(cx + fx·x/d, cy + fy·y/d)` with semi-axes `fx·R/d` and
//! `fy·R/d`.
use super::{Renderer, SurfaceSource};
use crate::edges::{canny, CannyParams};
use crate::image::{GrayImageU8, ImageU8};
use crate::types::{CameraIntrinsics, Pose};

const FOREGROUND: u8 = 255;

#[derive(Clone, Debug)]
pub struct DiscRenderer {
    pub intrinsics: CameraIntrinsics,
    pub radius: f64,
}

impl DiscRenderer {
    pub fn new(intrinsics: CameraIntrinsics, radius: f64) -> Self {
        Self { intrinsics, radius }
    }

    /// Projected centre `(u, v)` of the sphere, or `None` behind the camera.
    pub fn project_center(&self, pose: &Pose) -> Option<(f64, f64)> {
        let depth = -pose.position.z;
        if depth <= 0.0 || !depth.is_finite() {
            return None;
        }
        let k = &self.intrinsics;
        Some((
            k.cx + k.fx * pose.position.x / depth,
            k.cy + k.fy * pose.position.y / depth,
        ))
    }
}

impl Renderer for DiscRenderer {
    fn render(&mut self, pose: &Pose) -> Option<GrayImageU8> {
        let (u, v) = self.project_center(pose)?;
        let k = &self.intrinsics;
        let depth = -pose.position.z;
        let rx = k.fx * self.radius / depth;
        let ry = k.fy * self.radius / depth;
        if k.width == 0 || !(rx > 0.0 && ry > 0.0) {
            return None;
        }

        let mut out = GrayImageU8::zeros(k.width, k.height);
        let w = k.width;
        for (y, row) in out.data_mut().chunks_exact_mut(w).enumerate() {
            let dy = (y as f64 - v) / ry;
            for (x, px) in row.iter_mut().enumerate() {
                let dx = (x as f64 - u) / rx;
                if dx * dx + dy * dy <= 1.0 {
                    *px = FOREGROUND;
                }
            }
        }
        Some(out)
    }
}

/// Event surface that never changes until replaced.
#[derive(Clone, Debug)]
pub struct StaticSurface {
    image: GrayImageU8,
}

impl StaticSurface {
    pub fn new(image: GrayImageU8) -> Self {
        Self { image }
    }

    pub fn replace(&mut self, image: GrayImageU8) {
        self.image = image;
    }
}

impl SurfaceSource for StaticSurface {
    fn surface(&self) -> ImageU8<'_> {
        self.image.as_view()
    }
}

/// Event-like surface: the Canny edges of the object rendered at `pose`.
pub fn edge_surface<R: Renderer>(renderer: &mut R, pose: &Pose) -> Option<GrayImageU8> {
    let rendered = renderer.render(pose)?;
    let mask = canny(&rendered.as_view().to_f32(), CannyParams::default());
    let data = mask
        .data
        .iter()
        .map(|&m| if m > 0.0 { FOREGROUND } else { 0 })
        .collect();
    Some(GrayImageU8::new(mask.w, mask.h, data))
}
