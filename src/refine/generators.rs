//! Per-axis warp models.
//!
//! Each translational axis is linearised around the current depth `d` with
//! the pinhole interaction matrix:
//!
//! - lateral axes: a shift of `du` pixels corresponds to `du * d / f`, where
//!   `f` is the focal length along that image axis;
//! - depth: scaling the image about the principal point so that a point at
//!   half the image width moves by `dp` pixels corresponds to `dp * d / (w / 2)`.
//!
//! The rotational axes have no model: the small-angle image motion they would
//! induce is not derived here, so [`WarpModel::for_axis`] returns `None`.
use super::types::Axis;
use crate::types::CameraIntrinsics;
use crate::warp::AffineMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageAxis {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarpModel {
    Lateral(ImageAxis),
    Depth,
}

/// Image transforms for both directions and the matching position change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisStep {
    pub positive: AffineMap,
    pub negative: AffineMap,
    /// Magnitude of the position change; the positive warp adds it.
    pub delta: f64,
}

impl WarpModel {
    pub fn for_axis(axis: Axis) -> Option<Self> {
        match axis {
            Axis::X => Some(WarpModel::Lateral(ImageAxis::Horizontal)),
            Axis::Y => Some(WarpModel::Lateral(ImageAxis::Vertical)),
            Axis::Z => Some(WarpModel::Depth),
            Axis::A | Axis::B | Axis::C => None,
        }
    }

    /// Plan a `dp`-pixel step at linearisation depth `depth`.
    ///
    /// Intrinsics must be validated beforehand; a zero focal length or width
    /// yields a non-finite delta.
    pub fn plan(&self, intrinsics: &CameraIntrinsics, depth: f64, dp: f64) -> AxisStep {
        match *self {
            WarpModel::Lateral(ImageAxis::Horizontal) => AxisStep {
                positive: AffineMap::translation(dp, 0.0),
                negative: AffineMap::translation(-dp, 0.0),
                delta: dp * depth / intrinsics.fx,
            },
            WarpModel::Lateral(ImageAxis::Vertical) => AxisStep {
                positive: AffineMap::translation(0.0, dp),
                negative: AffineMap::translation(0.0, -dp),
                delta: dp * depth / intrinsics.fy,
            },
            WarpModel::Depth => {
                let lever = intrinsics.half_width();
                let ratio = dp / lever;
                AxisStep {
                    positive: AffineMap::scale_about(intrinsics.cx, intrinsics.cy, 1.0 + ratio),
                    negative: AffineMap::scale_about(intrinsics.cx, intrinsics.cy, 1.0 - ratio),
                    delta: dp * depth / lever,
                }
            }
        }
    }
}
