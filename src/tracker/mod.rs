//! Fixed-period tracking loop around [`PoseRefiner`](crate::refine::PoseRefiner).
//!
//! Each step pulls the latest event surface, renders the current pose,
//! converts both into fields and runs one refinement cycle over the
//! translational axes. The loop never blocks on its collaborators: when the
//! renderer or the surface cannot deliver, the step is skipped and the
//! previous pose kept.

pub mod synthetic;

use crate::diagnostics::{CycleReport, TimingBreakdown};
use crate::fields::observation_field;
use crate::image::{GrayImageU8, ImageU8, ImageView};
use crate::refine::PoseRefiner;
use crate::types::Pose;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

pub use synthetic::{edge_surface, DiscRenderer, StaticSurface};

/// Produces a grayscale image of the tracked object at a pose.
///
/// Returns `None` when nothing could be rendered, e.g. the object is behind
/// the camera.
pub trait Renderer {
    fn render(&mut self, pose: &Pose) -> Option<GrayImageU8>;
}

/// Latest accumulated event surface.
pub trait SurfaceSource {
    fn surface(&self) -> ImageU8<'_>;
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TrackerOptions {
    /// Control period in milliseconds.
    pub period_ms: u64,
    /// Sleep out the rest of each period in [`Tracker::run`].
    pub pace: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            period_ms: 100,
            pace: true,
        }
    }
}

impl TrackerOptions {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    RenderFailed,
    EmptySurface,
    SizeMismatch,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::RenderFailed => "renderer produced no image",
            SkipReason::EmptySurface => "event surface is empty",
            SkipReason::SizeMismatch => "image size does not match the camera",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Refined(CycleReport),
    Skipped { reason: SkipReason },
}

pub struct Tracker<R, S> {
    refiner: PoseRefiner,
    renderer: R,
    source: S,
    options: TrackerOptions,
    pose: Pose,
}

impl<R: Renderer, S: SurfaceSource> Tracker<R, S> {
    pub fn new(
        refiner: PoseRefiner,
        renderer: R,
        source: S,
        options: TrackerOptions,
        initial: Pose,
    ) -> Self {
        Self {
            refiner,
            renderer,
            source,
            options,
            pose: initial,
        }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn refiner(&self) -> &PoseRefiner {
        &self.refiner
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Run one cycle and adopt the selected pose.
    pub fn step(&mut self) -> StepOutcome {
        match self.try_step() {
            Ok(report) => StepOutcome::Refined(report),
            Err(reason) => {
                warn!("tracker: skipping cycle, {reason}");
                StepOutcome::Skipped { reason }
            }
        }
    }

    fn try_step(&mut self) -> std::result::Result<CycleReport, SkipReason> {
        let (w, h) = {
            let k = self.refiner.intrinsics();
            (k.width, k.height)
        };

        let mut timings = TimingBreakdown::default();
        let start = Instant::now();
        let surface = self.source.surface();
        if surface.is_empty() {
            return Err(SkipReason::EmptySurface);
        }
        if surface.dims() != (w, h) {
            return Err(SkipReason::SizeMismatch);
        }
        let observation =
            observation_field(&surface.to_f32(), &self.refiner.options().observation);
        timings.push_since("observation", start);

        let start = Instant::now();
        let rendered = self
            .renderer
            .render(&self.pose)
            .ok_or(SkipReason::RenderFailed)?;
        if (rendered.width(), rendered.height()) != (w, h) {
            return Err(SkipReason::SizeMismatch);
        }
        self.refiner.set_current(self.pose.clone());
        self.refiner
            .set_projection_image(self.pose.clone(), &rendered.as_view().to_f32());
        timings.push_since("projection", start);

        let step_px = self.refiner.options().step_px;
        let selection = self.refiner.refine(&observation, step_px);
        self.pose = selection.pose;

        // a cycle always exists after refine()
        let mut report = self.refiner.report().ok_or(SkipReason::RenderFailed)?;
        timings.extend_prefixed("refine.", &report.timings);
        report.timings = timings;
        Ok(report)
    }

    /// Run `cycles` steps, pacing to the control period when enabled.
    pub fn run(&mut self, cycles: usize) -> Vec<StepOutcome> {
        let period = self.options.period();
        let mut outcomes = Vec::with_capacity(cycles);
        for _ in 0..cycles {
            let tick = Instant::now();
            outcomes.push(self.step());
            if self.options.pace {
                if let Some(rest) = period.checked_sub(tick.elapsed()) {
                    thread::sleep(rest);
                }
            }
        }
        outcomes
    }
}
