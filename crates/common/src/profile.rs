//! Named profile persistence.
//!
//! A profile is a complete [`TrackerConfig`] stored as pretty-printed JSON
//! under `<profiles_dir>/<name>.json`. Loading never mutates anything: it
//! returns a fresh config value or an error, so a failed load leaves the
//! caller's configuration untouched.

use std::path::{Path, PathBuf};

use crate::config::TrackerConfig;
use crate::error::{TrackError, TrackResult};

/// Reject names that are empty or could escape the profiles directory.
/// Runs before any filesystem access.
pub fn validate_profile_name(name: &str) -> TrackResult<()> {
    if name.is_empty() || name.chars().any(std::path::is_separator) {
        return Err(TrackError::InvalidProfileName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Path a profile with the given name would live at.
pub fn profile_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

/// Save a configuration as a named profile, creating the directory if
/// needed. Returns the path written.
pub fn save_profile(dir: &Path, name: &str, config: &TrackerConfig) -> TrackResult<PathBuf> {
    validate_profile_name(name)?;

    std::fs::create_dir_all(dir)?;
    let path = profile_path(dir, name);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;

    tracing::info!(profile = name, path = %path.display(), "Profile saved");
    Ok(path)
}

/// Load a named profile into a fresh configuration value.
pub fn load_profile(dir: &Path, name: &str) -> TrackResult<TrackerConfig> {
    validate_profile_name(name)?;

    let path = profile_path(dir, name);
    if !path.exists() {
        return Err(TrackError::ProfileNotFound { path });
    }

    let content = std::fs::read_to_string(&path)?;
    let config: TrackerConfig = serde_json::from_str(&content)?;
    config.validate()?;

    tracing::info!(profile = name, "Profile loaded");
    Ok(config)
}

/// Names of all saved profiles, sorted. Missing directory means none.
pub fn list_profiles(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return vec![];
    };

    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(String::from)
            } else {
                None
            }
        })
        .collect();
    names.sort();
    names
}
