//! Cross-tick lock state.

use crate::candidate::Candidate;
use crate::geometry::{PixelPos, Vec2};

/// State carried across ticks for the currently tracked candidate.
///
/// Owned exclusively by the tick loop's selector/estimator pair and
/// mutated at most once per tick. Velocity is defined as zero until two
/// observations of the same lock have occurred.
#[derive(Debug, Clone, Default)]
pub struct LockState {
    /// The locked candidate, if any.
    pub target: Option<Candidate>,

    /// Session time (seconds) at which the current lock was acquired.
    pub acquired_at_secs: f64,

    /// Most recent observed position of the locked candidate.
    pub last_pos: Option<PixelPos>,

    /// Estimated velocity of the locked candidate, px/s.
    pub velocity: Vec2,

    /// Session time (seconds) of the most recent observation.
    pub last_update_secs: f64,
}

impl LockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the current lock was acquired less than `window_secs` ago.
    pub fn within_window(&self, now_secs: f64, window_secs: f64) -> bool {
        self.target.is_some() && now_secs - self.acquired_at_secs < window_secs
    }

    /// Install a newly selected candidate. Resets the motion state; the
    /// first observation of a new lock carries no velocity.
    pub fn acquire(&mut self, candidate: Candidate, now_secs: f64) {
        self.target = Some(candidate);
        self.acquired_at_secs = now_secs;
        self.last_pos = None;
        self.velocity = Vec2::ZERO;
        self.last_update_secs = now_secs;
    }

    /// Refresh the locked candidate with this tick's observation without
    /// touching the acquisition timestamp.
    pub fn retain(&mut self, candidate: Candidate) {
        self.target = Some(candidate);
    }

    /// Drop the lock entirely. Velocity becomes meaningless and is reset.
    pub fn invalidate(&mut self) {
        self.target = None;
        self.last_pos = None;
        self.velocity = Vec2::ZERO;
    }
}
