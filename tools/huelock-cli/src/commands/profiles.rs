//! Manage named configuration profiles.

use std::path::PathBuf;

use huelock_common::config::TrackerConfig;
use huelock_common::profile::{list_profiles, load_profile, save_profile};

fn profiles_dir(dir_override: Option<PathBuf>) -> PathBuf {
    dir_override.unwrap_or_else(|| TrackerConfig::default().profiles_dir)
}

pub fn list(dir_override: Option<PathBuf>) -> anyhow::Result<()> {
    let dir = profiles_dir(dir_override);
    let profiles = list_profiles(&dir);

    if profiles.is_empty() {
        println!("No profiles in {}", dir.display());
        return Ok(());
    }

    println!("Profiles in {}:", dir.display());
    for name in profiles {
        println!("  {name}");
    }
    Ok(())
}

pub fn save(
    name: String,
    from: Option<PathBuf>,
    dir_override: Option<PathBuf>,
) -> anyhow::Result<()> {
    let dir = profiles_dir(dir_override);

    let config = match from {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
            let config: TrackerConfig = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid config in {}: {e}", path.display()))?;
            config.validate()?;
            config
        }
        None => TrackerConfig::default(),
    };

    let path = save_profile(&dir, &name, &config)
        .map_err(|e| anyhow::anyhow!("Failed to save profile: {e}"))?;
    println!("Profile {name:?} saved to {}", path.display());
    Ok(())
}

pub fn show(name: String, dir_override: Option<PathBuf>) -> anyhow::Result<()> {
    let dir = profiles_dir(dir_override);
    let config = load_profile(&dir, &name)
        .map_err(|e| anyhow::anyhow!("Failed to load profile {name:?}: {e}"))?;

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
