//! Axis tags and candidate records produced during one refinement cycle.
use crate::image::ImageF32;
use crate::types::Pose;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Degrees of freedom addressable by the search.
///
/// `X`, `Y` and `Z` translate the object; `A`, `B` and `C` are rotational and
/// currently have no warp generator, see [`super::generators::WarpModel::for_axis`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
    A,
    B,
    C,
}

impl Axis {
    /// All axes in selection order.
    pub const ALL: [Axis; 6] = [Axis::X, Axis::Y, Axis::Z, Axis::A, Axis::B, Axis::C];
    pub const TRANSLATIONAL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_rotational(self) -> bool {
        matches!(self, Axis::A | Axis::B | Axis::C)
    }

    /// Index into [`Pose::position`] moved by this axis.
    pub fn position_component(self) -> Option<usize> {
        match self {
            Axis::X => Some(0),
            Axis::Y => Some(1),
            Axis::Z => Some(2),
            Axis::A | Axis::B | Axis::C => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::A => "a",
            Axis::B => "b",
            Axis::C => "c",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Positive first: ties between directions resolve in this order.
    pub const BOTH: [Direction; 2] = [Direction::Positive, Direction::Negative];

    pub fn sign(self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

/// Perturbed pose, its warped attraction field and the resulting score.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub pose: Pose,
    pub image: ImageF32,
    pub score: f64,
}

impl Candidate {
    /// Placeholder that can never win a strict comparison.
    pub fn sentinel(pose: &Pose) -> Self {
        Self {
            pose: pose.clone(),
            image: ImageF32::default(),
            score: f64::NEG_INFINITY,
        }
    }

    pub fn is_evaluated(&self) -> bool {
        self.score > f64::NEG_INFINITY
    }
}

#[derive(Clone, Debug)]
pub struct CandidatePair {
    pub positive: Candidate,
    pub negative: Candidate,
}

impl CandidatePair {
    pub fn sentinel(pose: &Pose) -> Self {
        Self {
            positive: Candidate::sentinel(pose),
            negative: Candidate::sentinel(pose),
        }
    }

    pub fn get(&self, direction: Direction) -> &Candidate {
        match direction {
            Direction::Positive => &self.positive,
            Direction::Negative => &self.negative,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut Candidate {
        match direction {
            Direction::Positive => &mut self.positive,
            Direction::Negative => &mut self.negative,
        }
    }
}

/// Where the selected pose came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CandidateSource {
    Baseline,
    Perturbed { axis: Axis, direction: Direction },
}

/// Outcome of best-candidate selection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Selection {
    pub pose: Pose,
    pub score: f64,
    pub source: CandidateSource,
}

impl Selection {
    pub fn is_baseline(&self) -> bool {
        self.source == CandidateSource::Baseline
    }
}
