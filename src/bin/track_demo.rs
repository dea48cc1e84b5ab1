use event_pose::config::{load_config, TrackerConfig};
use event_pose::error::{Error, Result};
use event_pose::fields::observation_field;
use event_pose::image::io::{save_grayscale_f32, save_rgb, write_json_file};
use event_pose::image::ImageF32;
use event_pose::refine::PoseRefiner;
use event_pose::tracker::{
    edge_surface, DiscRenderer, StaticSurface, StepOutcome, SurfaceSource, Tracker,
};
use event_pose::types::Pose;
use event_pose::visualize::overlay_fields;
use log::info;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

#[derive(Serialize)]
struct Trace<'a> {
    initial_pose: &'a Pose,
    target_pose: &'a Pose,
    final_pose: &'a Pose,
    final_error: f64,
    cycles: &'a [StepOutcome],
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "track_demo".to_string());
    let config_path = match (args.next(), args.next()) {
        (Some(path), None) => PathBuf::from(path),
        _ => return Err(Error::Usage(format!("usage: {program} <config.json>"))),
    };
    let config = load_config(&config_path)?;

    let mut tracker = build_tracker(&config)?;
    let outcomes = tracker.run(config.cycles);

    let refined = outcomes
        .iter()
        .filter(|o| matches!(o, StepOutcome::Refined(_)))
        .count();
    let final_pose = tracker.pose().clone();
    let final_error = (final_pose.position - config.scene.target_pose.position).norm();
    let initial_error =
        (config.scene.initial_pose.position - config.scene.target_pose.position).norm();
    println!("Tracking summary");
    println!("  cycles: {} ({} refined)", outcomes.len(), refined);
    println!(
        "  final position: [{:.4} {:.4} {:.4}]",
        final_pose.position.x, final_pose.position.y, final_pose.position.z
    );
    println!("  position error: {initial_error:.4} -> {final_error:.4}");

    if let Some(path) = &config.output.trace_json {
        let trace = Trace {
            initial_pose: &config.scene.initial_pose,
            target_pose: &config.scene.target_pose,
            final_pose: &final_pose,
            final_error,
            cycles: &outcomes,
        };
        write_json_file(path, &trace)?;
        info!("trace written to {}", path.display());
    }

    if let Some(path) = &config.output.grid_png {
        save_grayscale_f32(&tracker.refiner().candidate_grid(), path)?;
        info!("candidate grid written to {}", path.display());
    }

    if let Some(path) = &config.output.overlay_png {
        let surface = tracker.source().surface().to_f32();
        let observation = observation_field(&surface, &config.refine.observation);
        let empty = ImageF32::default();
        let expectation = tracker.refiner().projection_field().unwrap_or(&empty);
        save_rgb(&overlay_fields(&observation, expectation), path)?;
        info!("overlay written to {}", path.display());
    }

    Ok(())
}

fn build_tracker(config: &TrackerConfig) -> Result<Tracker<DiscRenderer, StaticSurface>> {
    let mut renderer = DiscRenderer::new(config.intrinsics, config.scene.radius);
    let surface = match config.scene.load_surface(&config.intrinsics)? {
        Some(image) => image,
        None => edge_surface(&mut renderer, &config.scene.target_pose).ok_or_else(|| {
            Error::Usage("target pose does not render; is it in front of the camera?".into())
        })?,
    };
    let refiner = PoseRefiner::new(config.intrinsics, config.refine.clone())?;
    Ok(Tracker::new(
        refiner,
        renderer,
        StaticSurface::new(surface),
        config.tracker.clone(),
        config.scene.initial_pose.clone(),
    ))
}
