#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod fields;
pub mod refine;
pub mod tracker;
pub mod types;

// Building blocks – public, but considered internals.
pub mod config;
pub mod diagnostics;
pub mod edges;
pub mod filters;
pub mod image;
pub mod visualize;
pub mod warp;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Error, Result};
pub use crate::refine::{Axis, Direction, PoseRefiner, RefineOptions, SearchError, Selection};
pub use crate::types::{CameraIntrinsics, Pose};

// Field transforms and the score that links them.
pub use crate::fields::{edge_potential, observation_field, similarity_score};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use event_pose::prelude::*;
///
/// # fn main() -> event_pose::Result<()> {
/// let k = CameraIntrinsics { width: 640, height: 480, cx: 320.0, cy: 240.0, fx: 500.0, fy: 500.0 };
/// let mut refiner = PoseRefiner::new(k, RefineOptions::default())?;
///
/// let pose = Pose::from_position(0.0, 0.0, -500.0);
/// let rendered = ImageF32::new(640, 480);
/// let surface = ImageF32::new(640, 480);
///
/// refiner.set_current(pose.clone());
/// refiner.set_projection_image(pose, &rendered);
/// let observation = observation_field(&surface, &refiner.options().observation);
/// let best = refiner.refine(&observation, 8.0);
/// println!("selected {:?} score={:.4}", best.source, best.score);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::fields::observation_field;
    pub use crate::image::{ImageF32, ImageU8};
    pub use crate::{CameraIntrinsics, Pose, PoseRefiner, RefineOptions};
}
