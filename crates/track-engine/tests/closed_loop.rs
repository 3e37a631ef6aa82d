//! End-to-end closed-loop behavior against the simulated world.

use std::path::PathBuf;

use huelock_common::config::TrackerConfig;
use huelock_track_engine::sim::{AlwaysEngaged, SceneSource, SimWorld, WorldActuator};
use huelock_track_engine::{SessionOptions, TrackSession};
use huelock_track_model::report::parse_records;
use huelock_track_model::{SkipReason, TickOutcome, Vec2};

fn sim_config() -> TrackerConfig {
    let mut config = TrackerConfig::default();
    // The convergence assertions measure pointer-to-centroid distance, so
    // target the centroid itself and skip extrapolation.
    config.smoothing.vertical_offset_px = 0;
    config.prediction.enabled = false;
    config
}

fn temp_log(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("huelock_test_loop_{tag}"));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("session.jsonl")
}

#[test]
fn closed_loop_converges_on_moving_target() {
    let world = SimWorld::shared(Vec2::new(60.0, 30.0), Vec2::new(1.0, 0.5), 12);
    let initial_error = world.borrow().tracking_error();

    let mut session = TrackSession::new(
        sim_config(),
        Box::new(SceneSource::new(world.clone())),
        Box::new(WorldActuator::new(world.clone())),
        Box::new(AlwaysEngaged),
        SessionOptions::default(),
    )
    .unwrap();

    for _ in 0..150 {
        let outcome = session.tick();
        assert!(outcome.was_processed());
    }

    let final_error = world.borrow().tracking_error();
    assert!(
        final_error < 25.0,
        "final error {final_error:.1} should be small"
    );
    assert!(final_error < initial_error / 2.0);
    assert!(session.lock().target.is_some());
    assert!(world.borrow().nudges_applied() > 0);
}

#[test]
fn capture_outage_skips_ticks_and_recovers() {
    let world = SimWorld::shared(Vec2::new(40.0, 0.0), Vec2::ZERO, 12);
    world.borrow_mut().fail_next = 3;

    let mut session = TrackSession::new(
        sim_config(),
        Box::new(SceneSource::new(world.clone())),
        Box::new(WorldActuator::new(world.clone())),
        Box::new(AlwaysEngaged),
        SessionOptions::default(),
    )
    .unwrap();

    for _ in 0..3 {
        assert_eq!(
            session.tick(),
            TickOutcome::skipped(SkipReason::CaptureUnavailable)
        );
    }

    // The loop continues; subsequent ticks process and correct.
    for _ in 0..40 {
        assert!(session.tick().was_processed());
    }

    let (processed, skipped) = session.tick_counts();
    assert_eq!(processed, 40);
    assert_eq!(skipped, 3);
    assert!(world.borrow().tracking_error() < 10.0);
}

#[test]
fn session_log_records_every_tick() {
    let log_path = temp_log("records");
    let world = SimWorld::shared(Vec2::new(40.0, 20.0), Vec2::ZERO, 12);
    world.borrow_mut().fail_next = 1;

    {
        let mut session = TrackSession::new(
            sim_config(),
            Box::new(SceneSource::new(world.clone())),
            Box::new(WorldActuator::new(world)),
            Box::new(AlwaysEngaged),
            SessionOptions {
                session_log: Some(log_path.clone()),
            },
        )
        .unwrap();

        for _ in 0..20 {
            session.tick();
        }
    }

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.lines().next().unwrap().starts_with("# "));

    let records = parse_records(&content).unwrap();
    assert_eq!(records.len(), 20);
    assert!(matches!(
        records[0].outcome,
        TickOutcome::Skipped {
            reason: SkipReason::CaptureUnavailable
        }
    ));
    assert!(records[1..].iter().all(|r| r.outcome.was_processed()));

    // Timestamps are monotonic.
    assert!(records.windows(2).all(|w| w[0].timestamp_ns <= w[1].timestamp_ns));

    std::fs::remove_dir_all(log_path.parent().unwrap()).ok();
}

#[test]
fn invalid_config_is_fatal_at_setup() {
    let mut config = sim_config();
    config.detection.capture_size = 0;

    let world = SimWorld::shared(Vec2::new(40.0, 0.0), Vec2::ZERO, 12);
    let result = TrackSession::new(
        config,
        Box::new(SceneSource::new(world.clone())),
        Box::new(WorldActuator::new(world)),
        Box::new(AlwaysEngaged),
        SessionOptions::default(),
    );
    assert!(result.is_err());
}
