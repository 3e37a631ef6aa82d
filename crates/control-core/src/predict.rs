//! Target position prediction.

use huelock_common::config::PredictionConfig;
use huelock_track_model::{PixelPos, Vec2};

/// Falloff exponent applied beyond the prediction limit. Must stay above
/// 1 so the attenuated distance keeps shrinking as the raw extrapolation
/// grows.
const FALLOFF_EXPONENT: f64 = 2.0;

/// Project a target's position over the configured lookahead horizon.
///
/// Linear extrapolation `pos + velocity · horizon`, unchanged when
/// prediction is disabled or the horizon is non-positive. An
/// extrapolation longer than `max_distance_px` is attenuated by
/// `(max/d)^2` instead of hard-clipped: a hard clip puts a step in the
/// corrective path as targets cross the threshold, while the power-law
/// falloff keeps successive frames continuous. The predicted distance
/// therefore never exceeds `max_distance_px`.
pub fn predict(pos: PixelPos, velocity: Vec2, config: &PredictionConfig) -> PixelPos {
    if !config.enabled || config.horizon_secs <= 0.0 {
        return pos;
    }

    let mut offset = velocity.scale(config.horizon_secs);
    let distance = offset.magnitude();

    if distance > config.max_distance_px {
        let falloff = (config.max_distance_px / distance).powf(FALLOFF_EXPONENT);
        offset = offset.scale(falloff);
    }

    PixelPos::new(
        (pos.x as f64 + offset.x) as i32,
        (pos.y as f64 + offset.y) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> PredictionConfig {
        PredictionConfig::default()
    }

    #[test]
    fn test_linear_extrapolation() {
        let predicted = predict(
            PixelPos::new(100, 100),
            Vec2::new(50.0, 30.0),
            &PredictionConfig {
                enabled: true,
                horizon_secs: 0.5,
                max_distance_px: 100.0,
            },
        );
        assert_eq!(predicted, PixelPos::new(125, 115));
    }

    #[test]
    fn test_disabled_returns_input() {
        let mut cfg = config();
        cfg.enabled = false;
        let pos = PixelPos::new(100, 100);
        assert_eq!(predict(pos, Vec2::new(9000.0, -9000.0), &cfg), pos);
    }

    #[test]
    fn test_nonpositive_horizon_returns_input() {
        let mut cfg = config();
        cfg.horizon_secs = 0.0;
        let pos = PixelPos::new(42, 7);
        assert_eq!(predict(pos, Vec2::new(100.0, 100.0), &cfg), pos);
    }

    #[test]
    fn test_falloff_is_continuous_at_limit() {
        // At exactly the limit the falloff factor is 1: no discontinuity.
        let cfg = PredictionConfig {
            enabled: true,
            horizon_secs: 1.0,
            max_distance_px: 100.0,
        };
        let at_limit = predict(PixelPos::new(0, 0), Vec2::new(100.0, 0.0), &cfg);
        let just_over = predict(PixelPos::new(0, 0), Vec2::new(101.0, 0.0), &cfg);

        assert_eq!(at_limit, PixelPos::new(100, 0));
        // One px/s more shrinks the output slightly instead of snapping.
        assert!(just_over.x <= 100 && just_over.x >= 98);
    }

    #[test]
    fn test_fast_targets_attenuate_harder() {
        let cfg = PredictionConfig {
            enabled: true,
            horizon_secs: 1.0,
            max_distance_px: 100.0,
        };
        let fast = predict(PixelPos::new(0, 0), Vec2::new(200.0, 0.0), &cfg);
        let faster = predict(PixelPos::new(0, 0), Vec2::new(400.0, 0.0), &cfg);
        assert!(faster.x < fast.x);
    }

    proptest! {
        #[test]
        fn prop_prediction_never_exceeds_limit(
            px in -200i32..200, py in -200i32..200,
            vx in -5000.0f64..5000.0, vy in -5000.0f64..5000.0,
            horizon in 0.0f64..2.0,
        ) {
            let cfg = PredictionConfig {
                enabled: true,
                horizon_secs: horizon,
                max_distance_px: 100.0,
            };
            let pos = PixelPos::new(px, py);
            let predicted = predict(pos, Vec2::new(vx, vy), &cfg);
            // Integer truncation can only move the point inward or < 1px out.
            prop_assert!(pos.distance_to(predicted) <= cfg.max_distance_px + 1.5);
        }
    }
}
