//! Huelock Track Engine
//!
//! Runs the closed tracking loop against pluggable device capabilities:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    TrackSession                       │
//! │  ┌─────────────┐  ┌─────────────────┐  ┌──────────┐  │
//! │  │ FrameSource │─▶│ segment/extract │─▶│ select   │  │
//! │  └─────────────┘  └─────────────────┘  │ estimate │  │
//! │  ┌──────────────────┐                  │ predict  │  │
//! │  │ ActivationSource │─────────────────▶│ smooth   │  │
//! │  └──────────────────┘                  └────┬─────┘  │
//! │                       ┌──────────┐          │        │
//! │                       │ Actuator │◀─────────┘        │
//! │                       └──────────┘                   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Devices appear only as the three capability traits below, so the loop
//! is fully testable without any real device: the [`sim`] module provides
//! an in-process world implementing all three.

pub mod log;
pub mod session;
pub mod sim;

use image::RgbImage;

use huelock_common::error::TrackResult;

pub use session::{SessionOptions, TrackSession};

/// Produces capture frames.
///
/// A source returns an `size × size` RGB frame anchored at the current
/// pointer position (top-left origin), or an error when no frame is
/// available this tick.
pub trait FrameSource {
    fn capture(&mut self, size: u32) -> TrackResult<RgbImage>;
}

/// Applies relative pointer movement in device units. Fire-and-forget:
/// there is no acknowledgment or feedback channel.
pub trait Actuator {
    fn nudge(&mut self, dx: i32, dy: i32) -> TrackResult<()>;
}

/// Reports whether corrective motion is currently engaged (e.g., a held
/// modifier). Polled once per tick.
pub trait ActivationSource {
    fn engaged(&mut self) -> bool;
}
