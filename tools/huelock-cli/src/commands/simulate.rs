//! Run the closed loop against the synthetic world.

use std::path::PathBuf;

use huelock_common::clock::TickPacer;
use huelock_track_engine::sim::{AlwaysEngaged, SceneSource, SimWorld, WorldActuator};
use huelock_track_engine::{SessionOptions, TrackSession};
use huelock_track_model::Vec2;

#[allow(clippy::too_many_arguments)]
pub fn run(
    ticks: u32,
    initial_offset: (f64, f64),
    drift: (f64, f64),
    radius: i32,
    profile: Option<String>,
    profiles_dir: Option<PathBuf>,
    log: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = super::resolve_config(profile.as_deref(), profiles_dir)?;
    // The synthetic target has no anchor below its centroid.
    config.smoothing.vertical_offset_px = 0;

    let world = SimWorld::shared(
        Vec2::new(initial_offset.0, initial_offset.1),
        Vec2::new(drift.0, drift.1),
        radius,
    );

    println!(
        "Simulating {ticks} ticks at {} Hz (capture {}px, target drift {:.1}/{:.1} px/tick)",
        config.pacing.tick_rate_hz, config.detection.capture_size, drift.0, drift.1
    );
    println!("  initial error: {:.1} px", world.borrow().tracking_error());

    let tick_rate = config.pacing.tick_rate_hz;
    let mut session = TrackSession::new(
        config,
        Box::new(SceneSource::new(world.clone())),
        Box::new(WorldActuator::new(world.clone())),
        Box::new(AlwaysEngaged),
        SessionOptions {
            session_log: log.clone(),
        },
    )
    .map_err(|e| anyhow::anyhow!("Failed to start session: {e}"))?;

    let mut pacer = TickPacer::new(tick_rate);
    for n in 1..=ticks {
        session.tick();
        pacer.pace();

        if n % 30 == 0 || n == ticks {
            println!(
                "  tick {n:>4}: error {:>6.1} px, lock {}",
                world.borrow().tracking_error(),
                if session.lock().target.is_some() {
                    "held"
                } else {
                    "none"
                }
            );
        }
    }

    let (processed, skipped) = session.tick_counts();
    println!("\nProcessed {processed} ticks, skipped {skipped}.");
    println!("Final error: {:.1} px", world.borrow().tracking_error());
    if let Some(path) = log {
        println!("Session log: {}", path.display());
    }

    Ok(())
}
