//! Huelock Vision Core
//!
//! Stateless computer vision for the tracking pipeline:
//! - **Segmentation:** frame → binary candidate mask by HSV color range
//! - **Extraction:** mask → sorted candidate list (connected regions,
//!   moments, filtering)
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod extract;
pub mod hsv;
pub mod segment;

pub use extract::extract_candidates;
pub use segment::segment_frame;
