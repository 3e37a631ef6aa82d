//! Corrective-motion smoothing.
//!
//! Converts the raw offset (current pointer position → predicted target)
//! into a damped actuation vector. One controller, two selectable laws:
//!
//! - [`SmoothingStrategy::Adaptive`] — the authoritative scalar law. A
//!   single coefficient derived from target size, offset distance, and
//!   target speed scales the raw offset: distance and speed raise the
//!   coefficient (long or fast corrections respond harder), size lowers
//!   it (large close targets need gentler moves to avoid overshoot).
//! - [`SmoothingStrategy::LowPass`] — normalized direction through a
//!   first-order low-pass filter with an explicit per-cycle step clamp
//!   derived from `max_angle_correction_deg`.
//!
//! The two laws are never mixed within one control cycle: each call
//! dispatches on the configured strategy exactly once.

use huelock_common::config::{SmoothingConfig, SmoothingStrategy};
use huelock_track_model::Vec2;

/// The smoothing controller. Holds the configured law and, for the
/// low-pass strategy, the filter state carried across ticks.
pub struct CorrectionController {
    config: SmoothingConfig,
    capture_size: u32,
    max_target_area: f64,
    /// Low-pass filter state (unit-direction space).
    filtered: Vec2,
}

impl CorrectionController {
    pub fn new(config: SmoothingConfig, capture_size: u32, max_target_area: f64) -> Self {
        Self {
            config,
            capture_size,
            max_target_area,
            filtered: Vec2::ZERO,
        }
    }

    /// Compute this tick's actuation vector in integer device units.
    pub fn correction(&mut self, offset: Vec2, target_area: f64, target_speed: f64) -> (i32, i32) {
        match self.config.strategy {
            SmoothingStrategy::Adaptive => self.adaptive(offset, target_area, target_speed),
            SmoothingStrategy::LowPass => self.lowpass(offset),
        }
    }

    /// Scalar adaptive law: `offset · coeff`, rounded.
    fn adaptive(&self, offset: Vec2, target_area: f64, target_speed: f64) -> (i32, i32) {
        let coeff = adaptive_coefficient(
            target_area,
            offset.magnitude(),
            target_speed,
            &self.config,
            self.capture_size,
            self.max_target_area,
        );
        offset.scale(coeff).round()
    }

    /// Low-pass law: filter the unit direction, then step toward the
    /// target no farther than the angle-derived per-cycle clamp.
    fn lowpass(&mut self, offset: Vec2) -> (i32, i32) {
        let direction = offset.normalized();

        // More responsive filtering for long corrections.
        let distance_factor = offset.magnitude() / self.capture_size as f64;
        let factor = if distance_factor > 0.5 {
            self.config.lowpass_factor * 0.8
        } else {
            self.config.lowpass_factor
        };

        self.filtered = Vec2::new(
            self.filtered.x + (direction.x - self.filtered.x) * factor,
            self.filtered.y + (direction.y - self.filtered.y) * factor,
        );

        let max_step = self.max_step();
        let step = offset.magnitude().min(max_step);
        self.filtered.scale(step).round()
    }

    /// Per-cycle step clamp for the low-pass law, in device units: the
    /// angle limit projected across the capture region.
    pub fn max_step(&self) -> f64 {
        self.config.max_angle_correction_deg.to_radians().tan() * self.capture_size as f64
    }

    /// Reset the low-pass filter state (e.g., after a lock change).
    pub fn reset(&mut self) {
        self.filtered = Vec2::ZERO;
    }
}

/// The combined adaptive coefficient, clamped to
/// `[min_coeff, max_coeff]` for any non-negative inputs.
///
/// `coeff = base · (1 − size_w·size) · (1 + dist_w·distance) ·
/// (1 + speed_w·speed)` with each factor first clamped to `[0, 1]`.
pub fn adaptive_coefficient(
    target_area: f64,
    distance: f64,
    speed: f64,
    config: &SmoothingConfig,
    capture_size: u32,
    max_target_area: f64,
) -> f64 {
    let size_factor = (target_area / max_target_area).clamp(0.0, 1.0);
    let distance_factor = (distance / capture_size as f64).clamp(0.0, 1.0);
    let speed_factor = (speed / config.speed_norm).clamp(0.0, 1.0);

    let coeff = config.base
        * (1.0 - config.size_weight * size_factor)
        * (1.0 + config.distance_weight * distance_factor)
        * (1.0 + config.speed_weight * speed_factor);

    coeff.clamp(config.min_coeff, config.max_coeff)
}
