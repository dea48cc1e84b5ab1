//! JSON configuration for the demo binary.
pub mod tracker;

pub use tracker::{load_config, OutputConfig, SceneConfig, TrackerConfig};
