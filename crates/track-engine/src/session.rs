//! The tracking session: one synchronous, single-threaded tick loop.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use huelock_common::clock::{TickClock, TickPacer};
use huelock_common::config::TrackerConfig;
use huelock_common::error::TrackResult;
use huelock_control_core::{predict, CorrectionController, MotionEstimator, TargetSelector};
use huelock_track_model::report::{SessionLogHeader, TickRecord};
use huelock_track_model::{LockState, PixelPos, SkipReason, TickOutcome, TickSummary, Vec2};
use huelock_vision_core::{extract_candidates, segment_frame};

use crate::log::SessionLogWriter;
use crate::{ActivationSource, Actuator, FrameSource};

/// Optional session behaviors.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Write a JSONL session log to this path.
    pub session_log: Option<PathBuf>,
}

/// A tracking session that owns all mutable pipeline state.
///
/// Every stage runs strictly in sequence within [`TrackSession::tick`];
/// there is no concurrent access to any of the state here, so no locking
/// discipline is needed beyond single-writer-per-tick. Per-tick failures
/// are absorbed into [`TickOutcome::Skipped`]; only setup failures (in
/// [`TrackSession::new`]) are fatal.
pub struct TrackSession {
    config: TrackerConfig,
    frames: Box<dyn FrameSource>,
    actuator: Box<dyn Actuator>,
    activation: Box<dyn ActivationSource>,

    selector: TargetSelector,
    controller: CorrectionController,
    lock: LockState,
    last_acquired_at: f64,

    clock: TickClock,
    pacer: TickPacer,
    stop_flag: Arc<AtomicBool>,
    log: Option<SessionLogWriter>,

    ticks_processed: u64,
    ticks_skipped: u64,
}

impl TrackSession {
    /// Build a session. Validates the configuration and opens the session
    /// log; a failure here is fatal, unlike anything inside the loop.
    pub fn new(
        config: TrackerConfig,
        frames: Box<dyn FrameSource>,
        actuator: Box<dyn Actuator>,
        activation: Box<dyn ActivationSource>,
        options: SessionOptions,
    ) -> TrackResult<Self> {
        config.validate()?;

        let clock = TickClock::start();

        let log = match options.session_log {
            Some(path) => Some(SessionLogWriter::new(
                path,
                SessionLogHeader {
                    schema_version: "1.0".to_string(),
                    started_wall: clock.epoch_wall().to_string(),
                    capture_size: config.detection.capture_size,
                    tick_rate_hz: config.pacing.tick_rate_hz,
                },
            )?),
            None => None,
        };

        let selector = TargetSelector::new(
            config.selection.clone(),
            config.detection.max_target_area,
        );
        let controller = CorrectionController::new(
            config.smoothing.clone(),
            config.detection.capture_size,
            config.detection.max_target_area,
        );
        let pacer = TickPacer::new(config.pacing.tick_rate_hz);

        Ok(Self {
            config,
            frames,
            actuator,
            activation,
            selector,
            controller,
            lock: LockState::new(),
            last_acquired_at: 0.0,
            clock,
            pacer,
            stop_flag: Arc::new(AtomicBool::new(false)),
            log,
            ticks_processed: 0,
            ticks_skipped: 0,
        })
    }

    /// Run the loop at the configured tick rate until the stop flag is
    /// set. Cancellation is sampled once at the top of each tick; there
    /// is no mid-tick preemption.
    pub fn run(&mut self) -> TrackResult<()> {
        tracing::info!(
            capture_size = self.config.detection.capture_size,
            tick_rate_hz = self.config.pacing.tick_rate_hz,
            "Tracking session started"
        );

        while !self.stop_flag.load(Ordering::Relaxed) {
            self.tick();
            self.pacer.pace();
        }

        if let Some(ref mut log) = self.log {
            log.flush()?;
        }
        tracing::info!(
            processed = self.ticks_processed,
            skipped = self.ticks_skipped,
            "Tracking session stopped"
        );
        Ok(())
    }

    /// Execute one tick of the pipeline:
    /// capture → segment → extract → select → estimate → predict →
    /// smooth → actuate.
    ///
    /// A capture or actuation failure aborts this tick only; the lock
    /// state carries over unless invalidated by staleness on a later
    /// processed tick. Nothing is retried.
    pub fn tick(&mut self) -> TickOutcome {
        let engaged = self.activation.engaged();

        let frame = match self.frames.capture(self.config.detection.capture_size) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "Capture unavailable, skipping tick");
                return self.finish(TickOutcome::skipped(SkipReason::CaptureUnavailable));
            }
        };

        let mask = segment_frame(&frame, &self.config.detection);
        let candidates = extract_candidates(&mask, &self.config.detection);

        let now = self.clock.elapsed_secs();
        let (cx, cy) = self.config.capture_center();
        let center = PixelPos::new(cx, cy);

        let selected = self
            .selector
            .select(&candidates, center, &mut self.lock, now);

        let mut summary = TickSummary {
            candidates: candidates.len(),
            engaged,
            selected,
            predicted: None,
            actuation: None,
        };

        if let Some(candidate) = selected {
            // A fresh acquisition restarts the controller's filter state.
            if self.lock.acquired_at_secs != self.last_acquired_at {
                self.last_acquired_at = self.lock.acquired_at_secs;
                self.controller.reset();
            }

            let velocity = MotionEstimator::observe(&mut self.lock, candidate.pos, now);
            let predicted = predict(candidate.pos, velocity, &self.config.prediction);
            summary.predicted = Some(predicted);

            if engaged {
                let mut offset = center.offset_to(predicted);
                offset = offset + Vec2::new(0.0, self.config.smoothing.vertical_offset_px as f64);

                let (dx, dy) =
                    self.controller
                        .correction(offset, candidate.area, velocity.magnitude());
                summary.actuation = Some((dx, dy));

                if let Err(e) = self.actuator.nudge(dx, dy) {
                    tracing::warn!(error = %e, "Actuation failed, skipping tick");
                    return self.finish(TickOutcome::skipped(SkipReason::ActuationFailed));
                }
            }
        }

        self.finish(TickOutcome::Processed(summary))
    }

    /// Record the outcome and update counters.
    fn finish(&mut self, outcome: TickOutcome) -> TickOutcome {
        match outcome {
            TickOutcome::Processed(_) => self.ticks_processed += 1,
            TickOutcome::Skipped { .. } => self.ticks_skipped += 1,
        }

        if let Some(ref mut log) = self.log {
            let record = TickRecord {
                timestamp_ns: self.clock.elapsed_ns(),
                outcome: outcome.clone(),
            };
            if let Err(e) = log.write_record(&record) {
                tracing::warn!(error = %e, "Failed to write session log record");
            }
        }

        outcome
    }

    /// Get a clone of the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Current lock state (read-only).
    pub fn lock(&self) -> &LockState {
        &self.lock
    }

    /// Counts of processed and skipped ticks so far.
    pub fn tick_counts(&self) -> (u64, u64) {
        (self.ticks_processed, self.ticks_skipped)
    }

    /// Session time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.clock.elapsed_secs()
    }
}
