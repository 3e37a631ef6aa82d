//! Clock and tick-pacing utilities.
//!
//! The tick loop is anchored to a monotonic epoch captured at session
//! start. This module provides:
//! - [`TickClock`]: monotonic timestamps relative to that epoch
//! - [`TickPacer`]: fixed-rate pacing by sleeping the remainder of each
//!   tick's time budget (never a busy-wait)

use std::time::{Duration, Instant};

/// A session clock providing monotonic timestamps relative to a fixed
/// epoch (the moment the loop started).
#[derive(Debug, Clone)]
pub struct TickClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl TickClock {
    /// Create a new clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Seconds elapsed since the session started.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Nanoseconds elapsed since the session started.
    pub fn elapsed_ns(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert an elapsed nanosecond value to seconds.
    pub fn ns_to_secs(ns: u64) -> f64 {
        ns as f64 / 1_000_000_000.0
    }
}

/// Fixed-rate tick pacer.
///
/// After each tick's work, [`TickPacer::pace`] sleeps whatever remains of
/// the tick budget. A tick that overruns its budget is followed
/// immediately by the next one; the pacer never tries to catch up.
#[derive(Debug)]
pub struct TickPacer {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickPacer {
    /// Create a pacer targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / target_hz.max(1) as f64),
            last_tick: None,
        }
    }

    /// Sleep out the remainder of the current tick budget, then mark the
    /// start of the next tick. The first call returns immediately.
    pub fn pace(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_tick {
            if let Some(remaining) = Self::remaining(self.interval, now - last) {
                std::thread::sleep(remaining);
            }
        }
        self.last_tick = Some(Instant::now());
    }

    /// Budget left after `elapsed` of a tick interval, `None` on overrun.
    fn remaining(interval: Duration, elapsed: Duration) -> Option<Duration> {
        interval.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    /// Target interval between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed_is_small_at_start() {
        let clock = TickClock::start();
        assert!(clock.elapsed_secs() < 1.0);
    }

    #[test]
    fn test_ns_to_secs_conversion() {
        assert!((TickClock::ns_to_secs(1_500_000_000) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_pacer_interval() {
        let pacer = TickPacer::new(60);
        let ms = pacer.interval().as_secs_f64() * 1000.0;
        assert!((ms - 16.666).abs() < 0.1);
    }

    #[test]
    fn test_remaining_budget() {
        let interval = Duration::from_millis(16);
        assert_eq!(
            TickPacer::remaining(interval, Duration::from_millis(10)),
            Some(Duration::from_millis(6))
        );
        // Overrun: no sleep, never negative.
        assert_eq!(TickPacer::remaining(interval, Duration::from_millis(20)), None);
        assert_eq!(TickPacer::remaining(interval, interval), None);
    }

    #[test]
    fn test_pacer_first_call_does_not_block() {
        let mut pacer = TickPacer::new(1);
        let start = Instant::now();
        pacer.pace();
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
