//! Framestep configuration file handling

use anyhow::{Context, Result};
use framestep_animation::EngineConfig;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "framestep.toml";

/// Resolve the configuration to use.
///
/// An explicit path must exist. Without one, `framestep.toml` in the working
/// directory is used if present, otherwise the built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<EngineConfig> {
    let path = match explicit {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(CONFIG_FILE_NAME)
            } else {
                path.to_path_buf()
            };
            if !path.exists() {
                anyhow::bail!("No configuration found at {}", path.display());
            }
            Some(path)
        }
        None => Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|p| p.exists()),
    };

    match path {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("Failed to load {}", path.display())),
        None => {
            tracing::debug!("No {} found, using built-in defaults", CONFIG_FILE_NAME);
            Ok(EngineConfig::default())
        }
    }
}
