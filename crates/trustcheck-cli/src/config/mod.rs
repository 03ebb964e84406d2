//! Configuration file location and management.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use trustcheck::EngineConfig;

/// Resolve the config file path, preferring an explicit override.
pub fn path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let dirs = ProjectDirs::from("dev", "trustcheck", "trustcheck")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(dirs.config_dir().join("config.toml"))
}

/// Load configuration from file; a missing file yields defaults.
pub fn load(path: &Path) -> Result<EngineConfig> {
    EngineConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

/// Write a default configuration file.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}\n\
             Use --force to overwrite it.",
            path.display()
        );
    }

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = EngineConfig::default().to_toml()?;
    std::fs::write(path, content)?;

    Ok(())
}

/// Show only the ends of a credential
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}
