use event_pose::image::GrayImageU8;
use event_pose::refine::{Axis, CandidateSource, Direction, PoseRefiner, RefineOptions};
use event_pose::tracker::{
    edge_surface, DiscRenderer, SkipReason, StaticSurface, StepOutcome, Tracker, TrackerOptions,
};
use event_pose::{CameraIntrinsics, Pose};

const RADIUS: f64 = 20.0;

fn camera() -> CameraIntrinsics {
    CameraIntrinsics {
        width: 160,
        height: 120,
        cx: 80.0,
        cy: 60.0,
        fx: 125.0,
        fy: 125.0,
    }
}

fn unpaced() -> TrackerOptions {
    TrackerOptions {
        pace: false,
        ..TrackerOptions::default()
    }
}

/// Tracker starting at `initial` whose events come from the sphere at `target`.
fn tracker_for(initial: Pose, target: &Pose) -> Tracker<DiscRenderer, StaticSurface> {
    let mut renderer = DiscRenderer::new(camera(), RADIUS);
    let surface = edge_surface(&mut renderer, target).expect("target renders");
    let options = RefineOptions {
        step_px: 4.0,
        ..RefineOptions::default()
    };
    let refiner = PoseRefiner::new(camera(), options).expect("valid camera");
    Tracker::new(
        refiner,
        renderer,
        StaticSurface::new(surface),
        unpaced(),
        initial,
    )
}

#[test]
fn first_cycle_steps_towards_target() {
    let _ = env_logger::builder().is_test(true).try_init();
    let initial = Pose::from_position(0.0, 0.0, -100.0);
    // a 4 px step at depth 100 with fx = 125 moves x by exactly 3.2
    let target = Pose::from_position(3.2, 0.0, -100.0);
    let mut tracker = tracker_for(initial.clone(), &target);

    let report = match tracker.step() {
        StepOutcome::Refined(report) => report,
        other => panic!("cycle skipped: {other:?}"),
    };
    let selection = report.selection.expect("selection recorded");
    assert_eq!(
        selection.source,
        CandidateSource::Perturbed {
            axis: Axis::X,
            direction: Direction::Positive
        }
    );
    assert_eq!(report.pose_before, initial);
    assert!((tracker.pose().position.x - 3.2).abs() < 1e-9);
    assert_eq!(tracker.pose().position.y, 0.0);
    assert_eq!(tracker.pose().position.z, -100.0);

    let labels: Vec<&str> = report.timings.stages.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels[0], "observation");
    assert_eq!(labels[1], "projection");
    assert!(labels.iter().any(|l| l.starts_with("refine")));
}

#[test]
fn run_returns_one_outcome_per_cycle() {
    let initial = Pose::from_position(0.0, 0.0, -100.0);
    let target = Pose::from_position(3.2, 0.0, -100.0);
    let mut tracker = tracker_for(initial, &target);
    let outcomes = tracker.run(3);
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| matches!(o, StepOutcome::Refined(_))));
}

#[test]
fn render_failure_keeps_previous_pose() {
    let _ = env_logger::builder().is_test(true).try_init();
    let behind = Pose::from_position(0.0, 0.0, 10.0);
    let target = Pose::from_position(0.0, 0.0, -100.0);
    let mut tracker = tracker_for(behind.clone(), &target);

    let outcome = tracker.step();
    assert!(
        matches!(
            outcome,
            StepOutcome::Skipped {
                reason: SkipReason::RenderFailed
            }
        ),
        "{outcome:?}"
    );
    assert_eq!(tracker.pose(), &behind);
}

#[test]
fn unusable_surfaces_skip_the_cycle() {
    let initial = Pose::from_position(0.0, 0.0, -100.0);
    let mut tracker = tracker_for(initial.clone(), &initial);

    tracker.source_mut().replace(GrayImageU8::zeros(0, 0));
    assert!(matches!(
        tracker.step(),
        StepOutcome::Skipped {
            reason: SkipReason::EmptySurface
        }
    ));

    tracker.source_mut().replace(GrayImageU8::zeros(32, 32));
    assert!(matches!(
        tracker.step(),
        StepOutcome::Skipped {
            reason: SkipReason::SizeMismatch
        }
    ));
    assert_eq!(tracker.pose(), &initial);
}
