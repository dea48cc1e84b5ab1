mod common;

use common::synthetic_image::{edge_surface_f32, rectangle_f32, vga};
use event_pose::fields::observation_field;
use event_pose::image::ImageF32;
use event_pose::refine::{
    Axis, CandidateSource, Direction, PoseRefiner, RefineOptions, SearchState,
};
use event_pose::Pose;
use nalgebra::{UnitQuaternion, Vector3};

const STEP_PX: f64 = 8.0;

fn tilted_pose() -> Pose {
    Pose::new(
        Vector3::new(0.0, 0.0, -500.0),
        UnitQuaternion::from_euler_angles(0.1, -0.2, 0.3),
    )
}

/// Refiner whose projection is a rectangle centred on the principal point.
fn refiner_at(pose: &Pose) -> PoseRefiner {
    let k = vga();
    let mut refiner = PoseRefiner::new(k, RefineOptions::default()).expect("valid intrinsics");
    let rendered = rectangle_f32(k.width, k.height, 240, 180, 400, 300);
    refiner.set_current(pose.clone());
    refiner.set_projection_image(pose.clone(), &rendered);
    refiner
}

/// Evidence field of the same rectangle shifted by `(dx, dy)` pixels.
fn observation_shifted(dx: usize, dy: usize) -> ImageF32 {
    let k = vga();
    let shifted = rectangle_f32(k.width, k.height, 240 + dx, 180 + dy, 400 + dx, 300 + dy);
    observation_field(&edge_surface_f32(&shifted), &RefineOptions::default().observation)
}

#[test]
fn x_step_matches_interaction_matrix() {
    let pose = Pose::from_position(0.0, 0.0, -500.0);
    let mut refiner = refiner_at(&pose);
    let obs = observation_shifted(0, 0);
    refiner.reset_comparison(&obs);
    refiner.compare_axis(Axis::X, &obs, STEP_PX).expect("x supported");

    let set = refiner.candidates().expect("cycle in progress");
    let plus = &set.get(Axis::X, Direction::Positive).pose;
    let minus = &set.get(Axis::X, Direction::Negative).pose;
    assert_eq!(plus.position, Vector3::new(8.0, 0.0, -500.0));
    assert_eq!(minus.position, Vector3::new(-8.0, 0.0, -500.0));
}

#[test]
fn shifted_evidence_pulls_pose_along_x() {
    let _ = env_logger::builder().is_test(true).try_init();
    let pose = Pose::from_position(0.0, 0.0, -500.0);
    let mut refiner = refiner_at(&pose);
    let obs = observation_shifted(8, 0);

    let best = refiner.refine(&obs, STEP_PX);
    assert_eq!(
        best.source,
        CandidateSource::Perturbed {
            axis: Axis::X,
            direction: Direction::Positive
        }
    );
    assert_eq!(best.pose.position, Vector3::new(8.0, 0.0, -500.0));
    let baseline = refiner.baseline_score().expect("baseline scored");
    assert!(best.score > baseline, "score={} baseline={baseline}", best.score);
    assert_eq!(refiner.state(), SearchState::Selected);

    let report = refiner.report().expect("report");
    assert_eq!(report.step_px, Some(STEP_PX));
    assert_eq!(report.candidates.len(), 12);
    assert!(report.gain().is_some_and(|g| g > 0.0));
}

#[test]
fn shifted_evidence_pulls_pose_along_y() {
    let pose = Pose::from_position(0.0, 0.0, -500.0);
    let mut refiner = refiner_at(&pose);
    let obs = observation_shifted(0, 8);
    let best = refiner.refine(&obs, STEP_PX);
    assert_eq!(
        best.source,
        CandidateSource::Perturbed {
            axis: Axis::Y,
            direction: Direction::Positive
        }
    );
    assert_eq!(best.pose.position, Vector3::new(0.0, 8.0, -500.0));
}

#[test]
fn aligned_evidence_keeps_pose_bit_for_bit() {
    let pose = tilted_pose();
    let mut refiner = refiner_at(&pose);
    let obs = observation_shifted(0, 0);
    let best = refiner.refine(&obs, STEP_PX);
    assert!(best.is_baseline(), "source={:?}", best.source);
    assert_eq!(best.pose, pose);
    assert_eq!(best.pose.orientation, pose.orientation);
}

#[test]
fn repeated_cycles_are_deterministic() {
    let pose = Pose::from_position(0.0, 0.0, -500.0);
    let obs = observation_shifted(5, 3);

    let mut a = refiner_at(&pose);
    let mut b = refiner_at(&pose);
    let best_a = a.refine(&obs, STEP_PX);
    let best_b = b.refine(&obs, STEP_PX);
    assert_eq!(best_a, best_b);
    assert_eq!(best_a.score.to_bits(), best_b.score.to_bits());

    let set_a = a.candidates().expect("cycle");
    let set_b = b.candidates().expect("cycle");
    for ((_, _, ca), (_, _, cb)) in set_a.iter().zip(set_b.iter()) {
        assert_eq!(ca.score.to_bits(), cb.score.to_bits());
        assert_eq!(ca.pose, cb.pose);
    }
}

#[test]
fn axis_evaluation_order_does_not_matter() {
    let pose = Pose::from_position(0.0, 0.0, -500.0);
    let obs = observation_shifted(5, 3);

    let mut forward = refiner_at(&pose);
    forward.reset_comparison(&obs);
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        forward.compare_axis(axis, &obs, STEP_PX).expect("supported");
    }
    let mut backward = refiner_at(&pose);
    backward.reset_comparison(&obs);
    for axis in [Axis::Z, Axis::Y, Axis::X] {
        backward.compare_axis(axis, &obs, STEP_PX).expect("supported");
    }
    assert_eq!(forward.next_best(), backward.next_best());
}

#[test]
fn candidate_steps_are_bounded() {
    let pose = Pose::from_position(20.0, -10.0, -480.0);
    let mut refiner = refiner_at(&pose);
    let obs = observation_shifted(3, 2);
    refiner.reset_comparison(&obs);
    refiner.compare_translations(&obs, STEP_PX).expect("translations supported");

    let k = vga();
    let depth = pose.depth();
    let bound = STEP_PX * depth / k.fx.min(k.fy).min(k.half_width());
    let set = refiner.candidates().expect("cycle");
    for (axis, direction, candidate) in set.iter() {
        if axis.is_rotational() {
            assert!(!candidate.is_evaluated());
            continue;
        }
        let moved = (candidate.pose.position - pose.position).norm();
        assert!(
            moved <= bound + 1e-9,
            "{axis}/{direction:?} moved {moved} > {bound}"
        );
        assert_eq!(candidate.pose.orientation, pose.orientation);
    }
}

#[test]
fn candidate_grid_has_camera_size() {
    let pose = Pose::from_position(0.0, 0.0, -500.0);
    let mut refiner = refiner_at(&pose);
    let blank = refiner.candidate_grid();
    assert!(blank.data.iter().all(|&v| v == 0.0));

    let obs = observation_shifted(8, 0);
    refiner.refine(&obs, STEP_PX);
    let grid = refiner.candidate_grid();
    assert_eq!((grid.w, grid.h), (640, 480));
    assert!(grid.data.iter().any(|&v| v != 0.0));
}
