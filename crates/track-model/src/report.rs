//! Per-tick outcome reporting.
//!
//! Every tick of the loop produces a [`TickOutcome`]: either the pipeline
//! ran to completion (`Processed`) or the tick was skipped for an
//! enumerated reason. Outcomes are recorded in append-only JSONL session
//! logs, one [`TickRecord`] per line.

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::geometry::PixelPos;

/// Monotonic timestamp in nanoseconds since session start.
pub type TimestampNs = u64;

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TickOutcome {
    /// The full pipeline ran.
    Processed(TickSummary),

    /// The tick was aborted; lock state carries over unchanged.
    Skipped { reason: SkipReason },
}

/// Why a tick was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The frame source failed to produce a frame this tick.
    CaptureUnavailable,
    /// The actuator rejected the move command.
    ActuationFailed,
}

/// Summary of a processed tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSummary {
    /// Number of candidates the extractor produced.
    pub candidates: usize,

    /// Whether the activation source reported engaged.
    pub engaged: bool,

    /// The candidate selected this tick, if any.
    pub selected: Option<Candidate>,

    /// Predicted target position fed to the controller.
    pub predicted: Option<PixelPos>,

    /// Relative move handed to the actuator, in device units.
    pub actuation: Option<(i32, i32)>,
}

impl TickOutcome {
    pub fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }

    pub fn was_processed(&self) -> bool {
        matches!(self, Self::Processed(_))
    }
}

/// One session-log line: a tick outcome with its timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Monotonic nanoseconds since session start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The outcome payload.
    #[serde(flatten)]
    pub outcome: TickOutcome,
}

/// Session-log header, written as the first line prefixed with `#`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLogHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (ISO 8601).
    pub started_wall: String,

    /// Capture region side length in pixels.
    pub capture_size: u32,

    /// Nominal tick rate (Hz).
    pub tick_rate_hz: u32,
}

/// Parse records from JSONL content (one JSON object per line, `#` lines
/// ignored).
pub fn parse_records(jsonl: &str) -> Result<Vec<TickRecord>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}
