//! Pose-refinement search.
//!
//! Each cycle compares the evidence field against the projection's
//! attraction field and against warped copies of it, one pair per axis, and
//! keeps whichever pose scores highest:
//!
//! - [`generators`] maps an axis and a pixel step to image warps and a
//!   position change via the interaction-matrix approximation;
//! - [`workspace`] holds the candidate pairs of the cycle in progress;
//! - [`select`] applies the strict-maximum rule with its tie-break order;
//! - [`refiner`] drives the cycle state machine.

pub mod generators;
pub mod options;
pub mod refiner;
pub mod select;
pub mod types;
pub mod workspace;

pub use generators::{AxisStep, ImageAxis, WarpModel};
pub use options::RefineOptions;
pub use refiner::{PoseRefiner, SearchState};
pub use select::select_best;
pub use types::{Axis, Candidate, CandidatePair, CandidateSource, Direction, Selection};
pub use workspace::CandidateSet;

use thiserror::Error;

/// Misuse of the refinement state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("reset_comparison must run before evaluating axis {0}")]
    NotReset(Axis),
    #[error("axis {0} has no warp generator")]
    UnsupportedAxis(Axis),
}
