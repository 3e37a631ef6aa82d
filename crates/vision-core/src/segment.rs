//! Color segmentation: frame → binary candidate mask.

use image::{GrayImage, Luma, RgbImage};

use huelock_common::config::DetectionConfig;

use crate::hsv::rgb_to_hsv;

/// Threshold a frame against the configured target color.
///
/// The target hue wraps around the color wheel's zero point, so the valid
/// range is expressed as two sub-ranges (`band_low`, `band_high`) whose
/// masks are unioned — a single contiguous range cannot express the
/// wraparound. Foreground pixels are 255, background 0.
///
/// Stateless and deterministic: a pure function of the frame and the
/// detection configuration.
pub fn segment_frame(frame: &RgbImage, detection: &DetectionConfig) -> GrayImage {
    let (width, height) = frame.dimensions();
    let mut mask = GrayImage::new(width, height);

    for (x, y, pixel) in frame.enumerate_pixels() {
        let hsv = rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
        let hit = detection.band_low.contains(hsv) || detection.band_high.contains(hsv);
        mask.put_pixel(x, y, Luma([if hit { 255 } else { 0 }]));
    }

    mask
}
