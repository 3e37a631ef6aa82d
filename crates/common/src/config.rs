//! Tracker configuration.
//!
//! One immutable [`TrackerConfig`] value is built at startup (defaults, or a
//! loaded profile) and passed explicitly into every component call. Nothing
//! in the pipeline reads configuration from globals, and nothing mutates a
//! config mid-tick; swapping profiles means constructing a new value.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{TrackError, TrackResult};

/// Complete tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Directory where named profiles are stored.
    pub profiles_dir: PathBuf,

    /// Segmentation and candidate extraction parameters.
    pub detection: DetectionConfig,

    /// Target selection and lock parameters.
    pub selection: SelectionConfig,

    /// Motion prediction parameters.
    pub prediction: PredictionConfig,

    /// Corrective-motion smoothing parameters.
    pub smoothing: SmoothingConfig,

    /// Tick-loop pacing parameters.
    pub pacing: PacingConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Segmentation and candidate extraction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Side length of the square capture region, in pixels.
    pub capture_size: u32,

    /// Regions with pixel-count area at or below this are discarded.
    pub min_target_size: f64,

    /// Area used to normalize the size score and size factor.
    pub max_target_area: f64,

    /// Lower hue sub-range of the target color.
    pub band_low: ColorBand,

    /// Upper hue sub-range of the target color.
    ///
    /// The target hue wraps around the color wheel's zero point, so the
    /// valid range is expressed as two sub-ranges whose masks are unioned.
    pub band_high: ColorBand,
}

/// An inclusive HSV threshold range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBand {
    pub lower: Hsv,
    pub upper: Hsv,
}

/// An HSV triple in the OpenCV convention: hue in `0..=180`,
/// saturation and value in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

impl ColorBand {
    /// Whether a pixel value falls inside this band (inclusive on all
    /// three channels).
    pub fn contains(&self, p: Hsv) -> bool {
        self.lower.h <= p.h
            && p.h <= self.upper.h
            && self.lower.s <= p.s
            && p.s <= self.upper.s
            && self.lower.v <= p.v
            && p.v <= self.upper.v
    }
}

/// Target selection and lock parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Weight of proximity to the capture center.
    pub center_weight: f64,

    /// Weight of normalized candidate area.
    pub size_weight: f64,

    /// Weight of proximity to the previous lock position.
    pub continuity_weight: f64,

    /// How long a lock is preferred over re-scoring, in seconds.
    pub lock_window_secs: f64,

    /// Maximum centroid drift between ticks that still counts as the
    /// same candidate. Zero restores strict re-detection.
    pub lock_match_tolerance_px: f64,
}

/// Motion prediction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Whether to extrapolate target motion at all.
    pub enabled: bool,

    /// Lookahead horizon, in seconds.
    pub horizon_secs: f64,

    /// Extrapolation beyond this distance is attenuated by a smooth
    /// power-law falloff rather than a hard clip.
    pub max_distance_px: f64,
}

/// Corrective-motion smoothing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Which control law converts the raw offset into an actuation.
    pub strategy: SmoothingStrategy,

    /// Base smoothing coefficient before adaptive factors apply.
    pub base: f64,

    /// Influence of target size on the coefficient.
    pub size_weight: f64,

    /// Influence of offset distance on the coefficient.
    pub distance_weight: f64,

    /// Influence of target speed on the coefficient.
    pub speed_weight: f64,

    /// Speed (px/s) that normalizes the speed factor to 1.0.
    pub speed_norm: f64,

    /// Lower clamp on the combined coefficient.
    pub min_coeff: f64,

    /// Upper clamp on the combined coefficient.
    pub max_coeff: f64,

    /// Vertical anchor adjustment added to the raw offset before
    /// smoothing, in pixels (positive = below the centroid).
    pub vertical_offset_px: i32,

    /// Filter strength for the low-pass strategy, in `[0.0, 1.0]`.
    pub lowpass_factor: f64,

    /// Magnitude clamp for the low-pass strategy, in degrees.
    pub max_angle_correction_deg: f64,
}

/// Selectable smoothing control law. The two laws are never mixed within
/// one control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingStrategy {
    /// Scalar adaptive coefficient applied to the raw offset. Authoritative
    /// default.
    #[default]
    Adaptive,
    /// Normalized direction through a first-order low-pass filter with an
    /// explicit maximum-angle clamp.
    LowPass,
}

/// Tick-loop pacing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Target tick rate, in Hz.
    pub tick_rate_hz: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "huelock=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            profiles_dir: default_profiles_dir(),
            detection: DetectionConfig::default(),
            selection: SelectionConfig::default(),
            prediction: PredictionConfig::default(),
            smoothing: SmoothingConfig::default(),
            pacing: PacingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            capture_size: 256,
            min_target_size: 50.0,
            max_target_area: 2000.0,
            band_low: ColorBand {
                lower: Hsv::new(0, 150, 150),
                upper: Hsv::new(10, 255, 255),
            },
            band_high: ColorBand {
                lower: Hsv::new(160, 150, 150),
                upper: Hsv::new(180, 255, 255),
            },
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            center_weight: 0.4,
            size_weight: 0.3,
            continuity_weight: 0.3,
            lock_window_secs: 0.3,
            lock_match_tolerance_px: 3.0,
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            horizon_secs: 0.1,
            max_distance_px: 100.0,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            strategy: SmoothingStrategy::Adaptive,
            base: 0.2,
            size_weight: 0.5,
            distance_weight: 0.3,
            speed_weight: 0.2,
            speed_norm: 1000.0,
            min_coeff: 0.1,
            max_coeff: 1.0,
            vertical_offset_px: 30,
            lowpass_factor: 0.3,
            max_angle_correction_deg: 5.0,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { tick_rate_hz: 60 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl TrackerConfig {
    /// Check internal consistency. Called once at startup; a config that
    /// passes here cannot produce divide-by-zero or inverted clamps later.
    pub fn validate(&self) -> TrackResult<()> {
        if self.detection.capture_size == 0 {
            return Err(TrackError::config("capture_size must be positive"));
        }
        if self.detection.max_target_area <= 0.0 {
            return Err(TrackError::config("max_target_area must be positive"));
        }
        if self.detection.min_target_size < 0.0 {
            return Err(TrackError::config("min_target_size must be non-negative"));
        }
        if self.smoothing.speed_norm <= 0.0 {
            return Err(TrackError::config("speed_norm must be positive"));
        }
        if self.smoothing.min_coeff > self.smoothing.max_coeff {
            return Err(TrackError::config(
                "min_coeff must not exceed max_coeff",
            ));
        }
        if self.selection.lock_window_secs < 0.0 {
            return Err(TrackError::config("lock_window_secs must be non-negative"));
        }
        if self.pacing.tick_rate_hz == 0 {
            return Err(TrackError::config("tick_rate_hz must be positive"));
        }
        Ok(())
    }

    /// Capture center in capture-local pixel coordinates.
    pub fn capture_center(&self) -> (i32, i32) {
        let half = (self.detection.capture_size / 2) as i32;
        (half, half)
    }
}

/// Default profiles directory.
fn default_profiles_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("huelock").join("profiles")
}
