use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by configuration, I/O and pose construction.
///
/// The refinement search itself has no recoverable failure modes; misuse of
/// its state machine is reported separately via [`crate::refine::SearchError`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid camera intrinsics: {0}")]
    InvalidIntrinsics(String),
    #[error("orientation quaternion has zero or non-finite norm")]
    DegenerateOrientation,
    #[error("image size mismatch: expected {expected_w}x{expected_h}, got {w}x{h}")]
    SizeMismatch {
        expected_w: usize,
        expected_h: usize,
        w: usize,
        h: usize,
    },
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("image codec error for {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
