pub mod check;
pub mod profiles;
pub mod simulate;

use std::path::PathBuf;

use huelock_common::config::TrackerConfig;
use huelock_common::profile::load_profile;

/// Resolve the working configuration: a named profile if requested,
/// defaults otherwise. An optional directory overrides where profiles
/// are looked up.
pub fn resolve_config(
    profile: Option<&str>,
    profiles_dir: Option<PathBuf>,
) -> anyhow::Result<TrackerConfig> {
    let mut base = TrackerConfig::default();
    if let Some(dir) = profiles_dir {
        base.profiles_dir = dir;
    }

    match profile {
        Some(name) => {
            let config = load_profile(&base.profiles_dir, name)
                .map_err(|e| anyhow::anyhow!("Failed to load profile {name:?}: {e}"))?;
            Ok(config)
        }
        None => Ok(base),
    }
}
