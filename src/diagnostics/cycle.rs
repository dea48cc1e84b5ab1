use super::timing::TimingBreakdown;
use crate::refine::{Axis, Direction, Selection};
use crate::types::Pose;
use serde::Serialize;

/// One entry per candidate slot of a refinement cycle.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    pub axis: Axis,
    pub direction: Direction,
    /// `None` while the slot still holds the sentinel.
    pub score: Option<f64>,
    pub position: [f64; 3],
}

/// Serializable summary of one refinement cycle.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    pub pose_before: Pose,
    pub depth: f64,
    pub baseline_score: f64,
    pub step_px: Option<f64>,
    pub candidates: Vec<CandidateReport>,
    pub selection: Option<Selection>,
    pub timings: TimingBreakdown,
}

impl CycleReport {
    /// Score improvement of the selected candidate over the baseline.
    pub fn gain(&self) -> Option<f64> {
        self.selection
            .as_ref()
            .map(|sel| sel.score - self.baseline_score)
    }
}
