//! Validate a configuration and print its effective parameters.

use std::path::PathBuf;

use huelock_control_core::smooth::adaptive_coefficient;

pub fn run(profile: Option<String>, profiles_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let config = super::resolve_config(profile.as_deref(), profiles_dir)?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration invalid: {e}"))?;

    println!("Configuration OK\n");
    println!("Detection:");
    println!("  capture size:      {} px", config.detection.capture_size);
    println!("  min target size:   {}", config.detection.min_target_size);
    println!("  max target area:   {}", config.detection.max_target_area);
    println!(
        "  hue bands:         {}..={} and {}..={}",
        config.detection.band_low.lower.h,
        config.detection.band_low.upper.h,
        config.detection.band_high.lower.h,
        config.detection.band_high.upper.h
    );

    println!("Selection:");
    println!(
        "  weights:           center {} / size {} / continuity {}",
        config.selection.center_weight,
        config.selection.size_weight,
        config.selection.continuity_weight
    );
    println!("  lock window:       {} s", config.selection.lock_window_secs);
    println!(
        "  match tolerance:   {} px",
        config.selection.lock_match_tolerance_px
    );

    println!("Prediction:");
    if config.prediction.enabled {
        println!("  horizon:           {} s", config.prediction.horizon_secs);
        println!("  max distance:      {} px", config.prediction.max_distance_px);
    } else {
        println!("  disabled");
    }

    println!("Smoothing:");
    println!("  strategy:          {:?}", config.smoothing.strategy);
    println!("  base:              {}", config.smoothing.base);
    // Representative coefficient: mid-size target, mid-range offset,
    // moderate speed.
    let sample = adaptive_coefficient(
        config.detection.max_target_area / 2.0,
        config.detection.capture_size as f64 / 2.0,
        config.smoothing.speed_norm / 2.0,
        &config.smoothing,
        config.detection.capture_size,
        config.detection.max_target_area,
    );
    println!(
        "  coefficient range: [{}, {}] (sample mid-point {sample:.3})",
        config.smoothing.min_coeff, config.smoothing.max_coeff
    );

    println!("Pacing:");
    println!("  tick rate:         {} Hz", config.pacing.tick_rate_hz);

    Ok(())
}
