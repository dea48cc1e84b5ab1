//! One-step coordinate-wise hill climb over warped projections.
//!
//! A cycle runs as
//!
//! 1. [`PoseRefiner::set_current`] / [`PoseRefiner::set_projection`] with the
//!    pose the projection was rendered at;
//! 2. [`PoseRefiner::reset_comparison`] scores the unperturbed projection and
//!    fills every candidate slot with the sentinel;
//! 3. [`PoseRefiner::compare_axis`] for any subset of the translational axes,
//!    in any order;
//! 4. [`PoseRefiner::next_best`] returns the best pose, or the baseline pose
//!    when no candidate is strictly better.
//!
//! The refiner holds the candidate buffers for the cycle only. It is not
//! meant to be shared between threads; one cycle per control tick.
use super::generators::WarpModel;
use super::options::RefineOptions;
use super::select::select_best;
use super::types::{Axis, Candidate, CandidateSource, Direction, Selection};
use super::workspace::CandidateSet;
use super::SearchError;
use crate::diagnostics::{CandidateReport, CycleReport, TimingBreakdown};
use crate::error::Result;
use crate::fields::{edge_potential, similarity_score};
use crate::image::ImageF32;
use crate::types::{CameraIntrinsics, Pose};
use crate::visualize::compose_candidate_grid;
use crate::warp::warp_affine;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

/// Lifecycle of a refinement cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    /// No cycle in progress.
    Idle,
    /// Baseline scored, no axis evaluated yet.
    Reset,
    /// At least one axis evaluated since the reset or the last selection.
    Evaluating,
    /// `next_best` has run and its answer is cached.
    Selected,
}

#[derive(Clone, Debug)]
struct Projection {
    pose: Pose,
    field: ImageF32,
}

#[derive(Clone, Debug)]
struct Cycle {
    baseline_score: f64,
    candidates: CandidateSet,
    steps: BTreeMap<Axis, f64>,
    selection: Option<Selection>,
    timings: TimingBreakdown,
}

#[derive(Clone, Debug)]
pub struct PoseRefiner {
    intrinsics: CameraIntrinsics,
    options: RefineOptions,
    current: Pose,
    depth: f64,
    projection: Option<Projection>,
    cycle: Option<Cycle>,
    state: SearchState,
}

impl PoseRefiner {
    /// Create a refiner for a validated camera.
    pub fn new(intrinsics: CameraIntrinsics, options: RefineOptions) -> Result<Self> {
        intrinsics.validate()?;
        let current = Pose::from_position(0.0, 0.0, 0.0);
        Ok(Self {
            intrinsics,
            options,
            depth: current.depth(),
            current,
            projection: None,
            cycle: None,
            state: SearchState::Idle,
        })
    }

    pub fn set_intrinsics(&mut self, intrinsics: CameraIntrinsics) -> Result<()> {
        intrinsics.validate()?;
        self.intrinsics = intrinsics;
        self.invalidate();
        Ok(())
    }

    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    pub fn options(&self) -> &RefineOptions {
        &self.options
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn current(&self) -> &Pose {
        &self.current
    }

    /// Linearisation depth of the current pose.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Set the pose candidates are perturbed from and refresh the depth.
    ///
    /// Any cycle in progress is discarded.
    pub fn set_current(&mut self, pose: Pose) {
        self.depth = pose.depth();
        self.current = pose;
        self.invalidate();
    }

    /// Set the attraction field rendered at `pose`.
    ///
    /// Any cycle in progress is discarded.
    pub fn set_projection(&mut self, pose: Pose, field: ImageF32) {
        self.projection = Some(Projection { pose, field });
        self.invalidate();
    }

    /// Convert a raw 0..=255 rendering to its attraction field and set it.
    pub fn set_projection_image(&mut self, pose: Pose, rendered: &ImageF32) {
        let field = edge_potential(rendered, &self.options.edge_potential);
        self.set_projection(pose, field);
    }

    pub fn projection_field(&self) -> Option<&ImageF32> {
        self.projection.as_ref().map(|p| &p.field)
    }

    /// Start a new cycle against `observation`.
    ///
    /// Without a projection the baseline scores zero.
    pub fn reset_comparison(&mut self, observation: &ImageF32) {
        let start = Instant::now();
        let baseline_score = self
            .projection
            .as_ref()
            .map_or(0.0, |p| similarity_score(observation, &p.field));
        let mut timings = TimingBreakdown::default();
        timings.push_since("baseline", start);
        self.cycle = Some(Cycle {
            baseline_score,
            candidates: CandidateSet::new(&self.current),
            steps: BTreeMap::new(),
            selection: None,
            timings,
        });
        self.state = SearchState::Reset;
    }

    /// Evaluate both directions of `axis` with a `dp`-pixel warp.
    pub fn compare_axis(
        &mut self,
        axis: Axis,
        observation: &ImageF32,
        dp: f64,
    ) -> std::result::Result<(), SearchError> {
        let model = WarpModel::for_axis(axis).ok_or(SearchError::UnsupportedAxis(axis))?;
        if self.cycle.is_none() {
            return Err(SearchError::NotReset(axis));
        }
        self.evaluate(axis, model, observation, dp);
        Ok(())
    }

    /// Evaluate x, y and z with the same step.
    pub fn compare_translations(
        &mut self,
        observation: &ImageF32,
        dp: f64,
    ) -> std::result::Result<(), SearchError> {
        for axis in Axis::TRANSLATIONAL {
            self.compare_axis(axis, observation, dp)?;
        }
        Ok(())
    }

    fn evaluate(&mut self, axis: Axis, model: WarpModel, observation: &ImageF32, dp: f64) {
        let Some(component) = axis.position_component() else {
            return;
        };
        let start = Instant::now();
        let step = model.plan(&self.intrinsics, self.depth, dp);
        let empty = ImageF32::default();
        let source = self.projection.as_ref().map_or(&empty, |p| &p.field);

        let mut evaluated = Vec::with_capacity(2);
        for direction in Direction::BOTH {
            let map = match direction {
                Direction::Positive => &step.positive,
                Direction::Negative => &step.negative,
            };
            let image = warp_affine(source, map);
            let score = similarity_score(observation, &image);
            let pose = self
                .current
                .translated(component, direction.sign() * step.delta);
            evaluated.push((direction, Candidate { pose, image, score }));
        }

        if let Some(cycle) = self.cycle.as_mut() {
            for (direction, candidate) in evaluated {
                cycle.candidates.record(axis, direction, candidate);
            }
            cycle.steps.insert(axis, dp);
            cycle.selection = None;
            cycle.timings.push_since(format!("axis {axis}"), start);
        }
        self.state = SearchState::Evaluating;
    }

    /// Best pose among the baseline and every evaluated candidate.
    ///
    /// Repeated calls without new evaluations return the cached answer. With
    /// no cycle in progress the current pose is returned with a sentinel score.
    pub fn next_best(&mut self) -> Selection {
        let baseline_pose = self
            .projection
            .as_ref()
            .map_or(&self.current, |p| &p.pose);
        let Some(cycle) = self.cycle.as_mut() else {
            return Selection {
                pose: self.current.clone(),
                score: f64::NEG_INFINITY,
                source: CandidateSource::Baseline,
            };
        };
        if let Some(selection) = &cycle.selection {
            return selection.clone();
        }

        let selection = select_best(baseline_pose, cycle.baseline_score, &cycle.candidates);
        debug!(
            "refine: baseline={:.4} selected={:?} score={:.4} depth={:.3} stages_ms={:.3}",
            cycle.baseline_score,
            selection.source,
            selection.score,
            self.depth,
            cycle.timings.total_ms
        );
        cycle.selection = Some(selection.clone());
        self.state = SearchState::Selected;
        selection
    }

    /// Run a full cycle over the translational axes.
    pub fn refine(&mut self, observation: &ImageF32, dp: f64) -> Selection {
        self.reset_comparison(observation);
        for axis in Axis::TRANSLATIONAL {
            if let Some(model) = WarpModel::for_axis(axis) {
                self.evaluate(axis, model, observation, dp);
            }
        }
        self.next_best()
    }

    pub fn baseline_score(&self) -> Option<f64> {
        self.cycle.as_ref().map(|c| c.baseline_score)
    }

    pub fn candidates(&self) -> Option<&CandidateSet> {
        self.cycle.as_ref().map(|c| &c.candidates)
    }

    /// Summary of the cycle in progress, if any.
    pub fn report(&self) -> Option<CycleReport> {
        let cycle = self.cycle.as_ref()?;
        let candidates = cycle
            .candidates
            .iter()
            .map(|(axis, direction, c)| CandidateReport {
                axis,
                direction,
                score: c.is_evaluated().then_some(c.score),
                position: [c.pose.position.x, c.pose.position.y, c.pose.position.z],
            })
            .collect();
        let mut steps = cycle.steps.values().copied();
        let step_px = steps.next().filter(|first| steps.all(|s| s == *first));
        Some(CycleReport {
            pose_before: self.current.clone(),
            depth: self.depth,
            baseline_score: cycle.baseline_score,
            step_px,
            candidates,
            selection: cycle.selection.clone(),
            timings: cycle.timings.clone(),
        })
    }

    /// 3×3 grid of the baseline and candidate fields with score bars.
    pub fn candidate_grid(&self) -> ImageF32 {
        let (w, h) = (self.intrinsics.width, self.intrinsics.height);
        let baseline = self
            .projection
            .as_ref()
            .zip(self.cycle.as_ref())
            .map(|(p, c)| (&p.field, c.baseline_score));
        compose_candidate_grid(w, h, baseline, self.candidates())
    }

    fn invalidate(&mut self) {
        self.cycle = None;
        self.state = SearchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intrinsics() -> CameraIntrinsics {
        CameraIntrinsics {
            width: 32,
            height: 24,
            cx: 16.0,
            cy: 12.0,
            fx: 40.0,
            fy: 40.0,
        }
    }

    fn stripe_field() -> ImageF32 {
        ImageF32::from_fn(32, 24, |x, _| if x == 12 { 0.5 } else { 0.0 })
    }

    fn stripe_observation(at: usize) -> ImageF32 {
        ImageF32::from_fn(32, 24, |x, _| if x == at { 1.0 } else { 0.0 })
    }

    fn ready(pose: &Pose) -> PoseRefiner {
        let mut r = PoseRefiner::new(intrinsics(), RefineOptions::default()).expect("refiner");
        r.set_current(pose.clone());
        r.set_projection(pose.clone(), stripe_field());
        r
    }

    #[test]
    fn state_machine_follows_cycle() {
        let pose = Pose::from_position(0.0, 0.0, -40.0);
        let mut r = ready(&pose);
        let obs = stripe_observation(16);
        assert_eq!(r.state(), SearchState::Idle);
        assert_eq!(
            r.compare_axis(Axis::X, &obs, 4.0),
            Err(SearchError::NotReset(Axis::X))
        );
        r.reset_comparison(&obs);
        assert_eq!(r.state(), SearchState::Reset);
        r.compare_axis(Axis::X, &obs, 4.0).expect("x");
        assert_eq!(r.state(), SearchState::Evaluating);
        let first = r.next_best();
        assert_eq!(r.state(), SearchState::Selected);
        assert_eq!(r.next_best(), first);
        r.set_current(pose);
        assert_eq!(r.state(), SearchState::Idle);
        assert!(r.candidates().is_none());
    }

    #[test]
    fn rotational_axes_are_rejected() {
        let pose = Pose::from_position(0.0, 0.0, -40.0);
        let mut r = ready(&pose);
        let obs = stripe_observation(12);
        r.reset_comparison(&obs);
        for axis in [Axis::A, Axis::B, Axis::C] {
            assert_eq!(
                r.compare_axis(axis, &obs, 4.0),
                Err(SearchError::UnsupportedAxis(axis))
            );
        }
        assert_eq!(r.state(), SearchState::Reset);
    }

    #[test]
    fn shifted_observation_selects_positive_x() {
        let pose = Pose::from_position(0.0, 0.0, -40.0);
        let mut r = ready(&pose);
        let obs = stripe_observation(16);
        let sel = r.refine(&obs, 4.0);
        assert_eq!(
            sel.source,
            CandidateSource::Perturbed {
                axis: Axis::X,
                direction: Direction::Positive
            }
        );
        assert_eq!(sel.pose.position.x, 4.0);
        assert_eq!(sel.pose.position.z, -40.0);
        let report = r.report().expect("report");
        assert_eq!(report.step_px, Some(4.0));
        assert_eq!(report.candidates.len(), 12);
        assert!(report.candidates[6].score.is_none());
    }

    #[test]
    fn aligned_observation_is_a_no_op() {
        let pose = Pose::from_array([0.1, -0.2, -40.0, 0.0, 0.3, 0.0, 0.9]).expect("pose");
        let mut r = ready(&pose);
        let obs = stripe_observation(12);
        let sel = r.refine(&obs, 4.0);
        assert!(sel.is_baseline());
        assert_eq!(sel.pose.to_array(), pose.to_array());
    }

    #[test]
    fn idle_next_best_returns_current() {
        let pose = Pose::from_position(1.0, 2.0, -3.0);
        let mut r = PoseRefiner::new(intrinsics(), RefineOptions::default()).expect("refiner");
        r.set_current(pose.clone());
        let sel = r.next_best();
        assert_eq!(sel.pose, pose);
        assert!(sel.is_baseline());
        assert_eq!(r.state(), SearchState::Idle);
    }

    #[test]
    fn missing_projection_scores_zero() {
        let mut r = PoseRefiner::new(intrinsics(), RefineOptions::default()).expect("refiner");
        r.set_current(Pose::from_position(0.0, 0.0, -10.0));
        let obs = stripe_observation(3);
        r.reset_comparison(&obs);
        assert_eq!(r.baseline_score(), Some(0.0));
        r.compare_translations(&obs, 2.0).expect("translations");
        let sel = r.next_best();
        assert!(sel.is_baseline());
        let grid = r.candidate_grid();
        assert_eq!((grid.w, grid.h), (32, 24));
    }
}
