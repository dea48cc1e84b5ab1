use super::types::{CandidateSource, Selection};
use super::workspace::CandidateSet;
use crate::types::Pose;

/// Pick the highest-scoring pose among the baseline and all candidates.
///
/// Comparisons are strict, so the baseline wins every tie, and among
/// candidates the first one in [`CandidateSet::iter`] order wins. When nothing
/// beats the baseline, `baseline_pose` is returned as is.
pub fn select_best(
    baseline_pose: &Pose,
    baseline_score: f64,
    candidates: &CandidateSet,
) -> Selection {
    let mut best = Selection {
        pose: baseline_pose.clone(),
        score: baseline_score,
        source: CandidateSource::Baseline,
    };
    let mut best_score = baseline_score;
    for (axis, direction, candidate) in candidates.iter() {
        if candidate.score > best_score {
            best_score = candidate.score;
            best = Selection {
                pose: candidate.pose.clone(),
                score: candidate.score,
                source: CandidateSource::Perturbed { axis, direction },
            };
        }
    }
    best
}
