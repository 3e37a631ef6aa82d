//! Target selection and lock retention.
//!
//! The selector favors stability over re-optimizing every frame: an
//! existing lock that is still visible inside the lock window is kept
//! unconditionally, which prevents flicker between similarly-scored
//! candidates. Only when no retainable lock exists are candidates scored.

use huelock_common::config::SelectionConfig;
use huelock_track_model::{Candidate, LockState, PixelPos};

/// Chooses which single candidate (if any) to track this tick.
pub struct TargetSelector {
    config: SelectionConfig,
    /// Area that normalizes the size score to 1.0 (the detection
    /// config's `max_target_area`).
    max_target_area: f64,
}

impl TargetSelector {
    pub fn new(config: SelectionConfig, max_target_area: f64) -> Self {
        Self {
            config,
            max_target_area,
        }
    }

    /// Select this tick's candidate and update the lock accordingly.
    ///
    /// Returns `None` for an empty candidate list, independent of prior
    /// lock state. The acquisition timestamp is refreshed only when a
    /// *new* candidate is selected, never when an existing lock is merely
    /// retained.
    pub fn select(
        &self,
        candidates: &[Candidate],
        center: PixelPos,
        lock: &mut LockState,
        now_secs: f64,
    ) -> Option<Candidate> {
        // Staleness first: a lock older than the window no longer binds.
        if lock.target.is_some() && !lock.within_window(now_secs, self.config.lock_window_secs) {
            tracing::debug!("Lock window expired");
            lock.invalidate();
        }

        if candidates.is_empty() {
            return None;
        }

        // Retain a live lock if its candidate is still present.
        if let Some(current) = lock.target {
            if let Some(matched) = self.match_existing(current.pos, candidates) {
                lock.retain(matched);
                return Some(matched);
            }
        }

        let last_lock_pos = lock.target.map(|t| t.pos);
        let best = self.best_scored(candidates, center, last_lock_pos);

        let is_new = lock.target.map(|t| t.pos) != Some(best.pos);
        if is_new {
            tracing::debug!(x = best.pos.x, y = best.pos.y, area = best.area, "New lock acquired");
            lock.acquire(best, now_secs);
        } else {
            lock.retain(best);
        }

        Some(best)
    }

    /// Nearest candidate within the match tolerance of the locked
    /// position. Exact-value membership is fragile (a 1-pixel centroid
    /// drift between ticks would break the lock), so matching is by
    /// proximity; a tolerance of zero restores strict re-detection.
    fn match_existing(&self, locked_pos: PixelPos, candidates: &[Candidate]) -> Option<Candidate> {
        candidates
            .iter()
            .map(|c| (c.pos.distance_to(locked_pos), c))
            .filter(|(dist, _)| *dist <= self.config.lock_match_tolerance_px)
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, c)| *c)
    }

    /// Highest-scoring candidate; ties resolve to the earliest position
    /// in the (area-sorted) input, so selection is deterministic.
    fn best_scored(
        &self,
        candidates: &[Candidate],
        center: PixelPos,
        last_lock_pos: Option<PixelPos>,
    ) -> Candidate {
        let mut best = candidates[0];
        let mut best_score = self.score(&best, center, last_lock_pos);

        for candidate in &candidates[1..] {
            let score = self.score(candidate, center, last_lock_pos);
            if score > best_score {
                best = *candidate;
                best_score = score;
            }
        }

        best
    }

    /// Weighted rating of a candidate: proximity to center, normalized
    /// size, and proximity to the previous lock (0 without one).
    pub fn score(
        &self,
        candidate: &Candidate,
        center: PixelPos,
        last_lock_pos: Option<PixelPos>,
    ) -> f64 {
        let center_score = 1.0 / (1.0 + candidate.pos.distance_to(center));
        let size_score = (candidate.area / self.max_target_area).min(1.0);
        let continuity_score = match last_lock_pos {
            Some(pos) => 1.0 / (1.0 + candidate.pos.distance_to(pos)),
            None => 0.0,
        };

        self.config.center_weight * center_score
            + self.config.size_weight * size_score
            + self.config.continuity_weight * continuity_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huelock_common::config::SelectionConfig;

    fn selector() -> TargetSelector {
        TargetSelector::new(SelectionConfig::default(), 2000.0)
    }

    fn candidate(x: i32, y: i32, area: f64) -> Candidate {
        Candidate::new(PixelPos::new(x, y), area)
    }

    const CENTER: PixelPos = PixelPos::new(128, 128);

    #[test]
    fn test_empty_list_yields_no_selection() {
        let mut lock = LockState::new();
        lock.acquire(candidate(100, 100, 1000.0), 0.0);

        let selected = selector().select(&[], CENTER, &mut lock, 0.1);
        assert!(selected.is_none());
        // Lock state itself is untouched by an empty tick.
        assert!(lock.target.is_some());
    }

    #[test]
    fn test_single_target_selected() {
        let mut lock = LockState::new();
        let selected = selector()
            .select(&[candidate(100, 100, 1000.0)], CENTER, &mut lock, 0.0)
            .unwrap();
        assert_eq!(selected.pos, PixelPos::new(100, 100));
        assert_eq!(lock.target, Some(selected));
    }

    #[test]
    fn test_lock_retained_over_higher_scoring_candidate() {
        let mut lock = LockState::new();
        let locked = candidate(200, 200, 600.0);
        lock.acquire(locked, 0.0);

        // A much better candidate appears dead-center, but the lock is
        // still inside the window and still visible.
        let candidates = [candidate(128, 128, 2000.0), locked];
        let selected = selector()
            .select(&candidates, CENTER, &mut lock, 0.1)
            .unwrap();

        assert_eq!(selected.pos, locked.pos);
        assert_eq!(lock.acquired_at_secs, 0.0);
    }

    #[test]
    fn test_lock_matches_within_tolerance() {
        let mut lock = LockState::new();
        lock.acquire(candidate(200, 200, 600.0), 0.0);

        // Centroid drifted 2 px between ticks; still the same target.
        let drifted = candidate(202, 200, 610.0);
        let candidates = [candidate(128, 128, 2000.0), drifted];
        let selected = selector()
            .select(&candidates, CENTER, &mut lock, 0.1)
            .unwrap();

        assert_eq!(selected, drifted);
        assert_eq!(lock.target, Some(drifted));
        assert_eq!(lock.acquired_at_secs, 0.0); // retention, not re-acquisition
    }

    #[test]
    fn test_expired_lock_rescores() {
        let mut lock = LockState::new();
        lock.acquire(candidate(200, 200, 600.0), 0.0);

        // Past the 0.3 s window: the central, larger candidate wins.
        let candidates = [candidate(128, 128, 2000.0), candidate(200, 200, 600.0)];
        let selected = selector()
            .select(&candidates, CENTER, &mut lock, 1.0)
            .unwrap();

        assert_eq!(selected.pos, PixelPos::new(128, 128));
        assert_eq!(lock.acquired_at_secs, 1.0);
    }

    #[test]
    fn test_zero_tolerance_requires_exact_match() {
        let mut config = SelectionConfig::default();
        config.lock_match_tolerance_px = 0.0;
        let selector = TargetSelector::new(config, 2000.0);

        let mut lock = LockState::new();
        lock.acquire(candidate(200, 200, 2500.0), 0.0);

        let drifted = candidate(201, 200, 2500.0);
        let selected = selector.select(&[drifted], CENTER, &mut lock, 0.1).unwrap();

        // No proximity match: the drifted candidate is a fresh lock.
        assert_eq!(selected, drifted);
        assert_eq!(lock.acquired_at_secs, 0.1);
    }

    #[test]
    fn test_weighted_score_beats_raw_size() {
        // Two widely separated targets, no prior lock: the near-center
        // 2000-area target and a far 500-area target. The formula, not
        // raw size, decides — and it also must not pick the far one.
        let near_center = candidate(120, 120, 2000.0);
        let far_small = candidate(20, 20, 500.0);

        let selector = selector();
        let mut lock = LockState::new();
        let selected = selector
            .select(&[near_center, far_small], CENTER, &mut lock, 0.0)
            .unwrap();

        assert_eq!(selected, near_center);
        let s_near = selector.score(&near_center, CENTER, None);
        let s_far = selector.score(&far_small, CENTER, None);
        assert!(s_near > s_far);
    }

    #[test]
    fn test_continuity_term_zero_without_lock() {
        let selector = selector();
        let c = candidate(100, 100, 1000.0);
        let without = selector.score(&c, CENTER, None);
        let with = selector.score(&c, CENTER, Some(PixelPos::new(100, 100)));
        assert!(with > without);
        // With no prior lock only center + size contribute.
        let expected = 0.4 * (1.0 / (1.0 + c.pos.distance_to(CENTER))) + 0.3 * (1000.0 / 2000.0);
        assert!((without - expected).abs() < 1e-12);
    }

    #[test]
    fn test_tie_breaks_to_earliest() {
        // Two identical candidates mirrored around the center score
        // identically; the first in input order must win.
        let a = candidate(100, 128, 1000.0);
        let b = candidate(156, 128, 1000.0);

        let mut lock = LockState::new();
        let selected = selector().select(&[a, b], CENTER, &mut lock, 0.0).unwrap();
        assert_eq!(selected, a);
    }
}
