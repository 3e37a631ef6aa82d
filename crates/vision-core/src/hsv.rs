//! RGB → HSV conversion.
//!
//! Uses the OpenCV byte convention so threshold constants transfer
//! directly: hue is halved into `0..=179`, saturation and value span
//! `0..=255`.

use huelock_common::config::Hsv;

/// Convert an 8-bit RGB pixel to HSV.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let rf = r as f64 / 255.0;
    let gf = g as f64 / 255.0;
    let bf = b as f64 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let hue_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (((gf - bf) / delta).rem_euclid(6.0))
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    Hsv {
        h: (hue_deg / 2.0).round().min(179.0) as u8,
        s: (saturation * 255.0).round() as u8,
        v: (max * 255.0).round() as u8,
    }
}
