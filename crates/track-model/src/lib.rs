//! Huelock Data Model
//!
//! Pure data types shared by every pipeline stage: capture-local
//! geometry, detected candidates, cross-tick lock state, and the per-tick
//! outcome records that session logs are built from.
//!
//! This crate is data only — no I/O, no platform dependencies.

pub mod candidate;
pub mod geometry;
pub mod lock;
pub mod report;

pub use candidate::Candidate;
pub use geometry::{PixelPos, Vec2};
pub use lock::LockState;
pub use report::{SkipReason, TickOutcome, TickRecord, TickSummary};
