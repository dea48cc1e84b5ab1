//! Pose state and camera calibration shared by every stage.
//!
//! A [`Pose`] is the 7-scalar rigid transform tracked across cycles: a 3D
//! position plus a unit quaternion. The raw array form orders the scalars as
//! `[x, y, z, qx, qy, qz, qw]`. The quaternion is normalised once at
//! construction; the search only ever perturbs the position, so the
//! orientation is carried through refinement untouched.
use crate::error::{Error, Result};
use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

const ORIENTATION_EPS: f64 = 1e-12;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "PoseRepr", try_from = "PoseRepr")]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

#[derive(Serialize, Deserialize)]
struct PoseRepr {
    position: [f64; 3],
    orientation: [f64; 4],
}

impl From<Pose> for PoseRepr {
    fn from(pose: Pose) -> Self {
        let q = pose.orientation.quaternion();
        Self {
            position: [pose.position.x, pose.position.y, pose.position.z],
            orientation: [q.i, q.j, q.k, q.w],
        }
    }
}

impl TryFrom<PoseRepr> for Pose {
    type Error = Error;

    fn try_from(repr: PoseRepr) -> Result<Self> {
        let [x, y, z] = repr.position;
        let [qx, qy, qz, qw] = repr.orientation;
        Pose::from_array([x, y, z, qx, qy, qz, qw])
    }
}

impl Pose {
    pub fn new(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose at `position` with identity orientation.
    pub fn from_position(x: f64, y: f64, z: f64) -> Self {
        Self::new(Vector3::new(x, y, z), UnitQuaternion::identity())
    }

    /// Build from `[x, y, z, qx, qy, qz, qw]`, normalising the quaternion.
    pub fn from_array(state: [f64; 7]) -> Result<Self> {
        let [x, y, z, qx, qy, qz, qw] = state;
        let q = Quaternion::new(qw, qx, qy, qz);
        let norm = q.norm();
        if !norm.is_finite() || norm < ORIENTATION_EPS {
            return Err(Error::DegenerateOrientation);
        }
        Ok(Self::new(
            Vector3::new(x, y, z),
            UnitQuaternion::from_quaternion(q),
        ))
    }

    pub fn to_array(&self) -> [f64; 7] {
        let q = self.orientation.quaternion();
        [
            self.position.x,
            self.position.y,
            self.position.z,
            q.i,
            q.j,
            q.k,
            q.w,
        ]
    }

    /// Euclidean distance of the position from the camera centre.
    ///
    /// Used as the linearisation depth when converting pixel steps to metric
    /// translations.
    pub fn depth(&self) -> f64 {
        self.position.norm()
    }

    /// Copy of this pose with `delta` added to one position component.
    pub fn translated(&self, component: usize, delta: f64) -> Self {
        let mut out = self.clone();
        out.position[component] += delta;
        out
    }

    /// Orientation as `[ax, ay, az, angle]` with a unit axis and angle in radians.
    ///
    /// The identity rotation maps to the `+z` axis with a zero angle.
    pub fn axis_angle(&self) -> [f64; 4] {
        match self.orientation.axis_angle() {
            Some((axis, angle)) => [axis.x, axis.y, axis.z, angle],
            None => [0.0, 0.0, 1.0, 0.0],
        }
    }

    pub fn from_axis_angle(position: Vector3<f64>, axis_angle: [f64; 4]) -> Result<Self> {
        let [ax, ay, az, angle] = axis_angle;
        let axis = Vector3::new(ax, ay, az);
        if angle == 0.0 {
            return Ok(Self::new(position, UnitQuaternion::identity()));
        }
        let axis = Unit::try_new(axis, ORIENTATION_EPS).ok_or(Error::DegenerateOrientation)?;
        Ok(Self::new(
            position,
            UnitQuaternion::from_axis_angle(&axis, angle),
        ))
    }
}

/// Pinhole intrinsics of the event camera. Immutable after configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    pub width: usize,
    pub height: usize,
    pub cx: f64,
    pub cy: f64,
    pub fx: f64,
    pub fy: f64,
}

impl CameraIntrinsics {
    /// Reject calibrations that would turn pixel steps into infinite or NaN
    /// pose updates.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidIntrinsics(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        for (name, value) in [("fx", self.fx), ("fy", self.fy)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidIntrinsics(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        for (name, value) in [("cx", self.cx), ("cy", self.cy)] {
            if !value.is_finite() {
                return Err(Error::InvalidIntrinsics(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Half the image width; the lever arm used by the depth warp.
    pub fn half_width(&self) -> f64 {
        self.width as f64 * 0.5
    }
}
