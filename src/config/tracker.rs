use crate::error::{Error, Result};
use crate::image::io::load_grayscale_image;
use crate::image::GrayImageU8;
use crate::refine::RefineOptions;
use crate::tracker::TrackerOptions;
use crate::types::{CameraIntrinsics, Pose};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct TrackerConfig {
    pub intrinsics: CameraIntrinsics,
    #[serde(default)]
    pub refine: RefineOptions,
    #[serde(default)]
    pub tracker: TrackerOptions,
    pub scene: SceneConfig,
    #[serde(default = "default_cycles")]
    pub cycles: usize,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Synthetic sphere scene.
///
/// The event surface is taken from `surface_image` when given, otherwise it
/// is the edge map of the sphere rendered at `target_pose`.
#[derive(Clone, Debug, Deserialize)]
pub struct SceneConfig {
    pub radius: f64,
    pub initial_pose: Pose,
    pub target_pose: Pose,
    #[serde(default)]
    pub surface_image: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub trace_json: Option<PathBuf>,
    pub grid_png: Option<PathBuf>,
    pub overlay_png: Option<PathBuf>,
}

fn default_cycles() -> usize {
    10
}

/// Read and validate a config file.
pub fn load_config(path: &Path) -> Result<TrackerConfig> {
    let contents = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: TrackerConfig = serde_json::from_str(&contents)?;
    config.intrinsics.validate()?;
    Ok(config)
}

impl SceneConfig {
    /// Load `surface_image` if configured, checking it against the camera.
    pub fn load_surface(&self, intrinsics: &CameraIntrinsics) -> Result<Option<GrayImageU8>> {
        let Some(path) = &self.surface_image else {
            return Ok(None);
        };
        let image = load_grayscale_image(path)?;
        if (image.width(), image.height()) != (intrinsics.width, intrinsics.height) {
            return Err(Error::SizeMismatch {
                expected_w: intrinsics.width,
                expected_h: intrinsics.height,
                w: image.width(),
                h: image.height(),
            });
        }
        Ok(Some(image))
    }
}
