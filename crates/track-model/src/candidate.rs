//! Detected candidate regions.

use serde::{Deserialize, Serialize};

use crate::geometry::PixelPos;

/// A connected color region detected in one frame: its area-weighted
/// centroid and pixel-count area.
///
/// Candidates are created fresh each tick by the extractor and discarded
/// after selection. Every candidate the extractor emits satisfies
/// `area > min_target_size` and has its centroid inside the capture
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Area-weighted centroid in capture-local pixels.
    pub pos: PixelPos,

    /// Region area in pixels (zeroth moment).
    pub area: f64,
}

impl Candidate {
    pub const fn new(pos: PixelPos, area: f64) -> Self {
        Self { pos, area }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_roundtrip() {
        let candidate = Candidate::new(PixelPos::new(100, 100), 1000.0);
        let json = serde_json::to_string(&candidate).unwrap();
        let parsed: Candidate = serde_json::from_str(&json).unwrap();
        assert_eq!(candidate, parsed);
    }
}
