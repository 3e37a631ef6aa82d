//! First-order motion estimation.

use huelock_track_model::{LockState, PixelPos, Vec2};

/// Estimates the locked candidate's instantaneous velocity from
/// successive observations. Keeps only the single most recent
/// position/timestamp pair — no history buffer.
pub struct MotionEstimator;

impl MotionEstimator {
    /// Velocity between two observations separated by `dt` seconds.
    ///
    /// `dt ≤ 0` yields zero regardless of the position delta: it guards
    /// both division by zero and the velocity spike a stalled-then-resumed
    /// loop would otherwise produce.
    pub fn velocity_between(current: PixelPos, last: PixelPos, dt_secs: f64) -> Vec2 {
        if dt_secs <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (current.x - last.x) as f64 / dt_secs,
            (current.y - last.y) as f64 / dt_secs,
        )
    }

    /// Fold this tick's observation into the lock state and return the
    /// updated velocity estimate.
    ///
    /// The first observation after a (re)acquisition has no previous
    /// position, so its velocity is zero by definition.
    pub fn observe(lock: &mut LockState, pos: PixelPos, now_secs: f64) -> Vec2 {
        let velocity = match lock.last_pos {
            Some(last) => Self::velocity_between(pos, last, now_secs - lock.last_update_secs),
            None => Vec2::ZERO,
        };

        lock.last_pos = Some(pos);
        lock.last_update_secs = now_secs;
        lock.velocity = velocity;
        velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_velocity_between() {
        let v = MotionEstimator::velocity_between(
            PixelPos::new(100, 100),
            PixelPos::new(50, 50),
            1.0,
        );
        assert_eq!(v, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_fractional_dt() {
        let v = MotionEstimator::velocity_between(
            PixelPos::new(10, 0),
            PixelPos::new(0, 0),
            0.1,
        );
        assert!((v.x - 100.0).abs() < 1e-9);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_first_observation_has_zero_velocity() {
        let mut lock = LockState::new();
        lock.acquire(
            huelock_track_model::Candidate::new(PixelPos::new(50, 50), 500.0),
            1.0,
        );

        let v = MotionEstimator::observe(&mut lock, PixelPos::new(50, 50), 1.0);
        assert_eq!(v, Vec2::ZERO);
        assert_eq!(lock.last_pos, Some(PixelPos::new(50, 50)));
    }

    #[test]
    fn test_second_observation_yields_velocity() {
        let mut lock = LockState::new();
        lock.acquire(
            huelock_track_model::Candidate::new(PixelPos::new(50, 50), 500.0),
            1.0,
        );
        MotionEstimator::observe(&mut lock, PixelPos::new(50, 50), 1.0);
        let v = MotionEstimator::observe(&mut lock, PixelPos::new(60, 45), 1.5);

        assert!((v.x - 20.0).abs() < 1e-9);
        assert!((v.y + 10.0).abs() < 1e-9);
        assert_eq!(lock.velocity, v);
    }

    proptest! {
        #[test]
        fn prop_nonpositive_dt_yields_zero(
            cx in -1000i32..1000, cy in -1000i32..1000,
            lx in -1000i32..1000, ly in -1000i32..1000,
            dt in -10.0f64..=0.0,
        ) {
            let v = MotionEstimator::velocity_between(
                PixelPos::new(cx, cy),
                PixelPos::new(lx, ly),
                dt,
            );
            prop_assert_eq!(v, Vec2::ZERO);
        }
    }
}
