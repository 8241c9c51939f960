//! Configuration file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::{config_path, default_scripts_dir};
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing the step scripts
    ///
    /// Relative paths are resolved against the config file's directory.
    #[serde(default)]
    pub scripts_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration
    ///
    /// An explicitly requested file must exist. Without one, the platform
    /// config path is tried and defaults are used if nothing is there.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and parse a specific configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        if let Some(dir) = config.scripts_dir.take() {
            let base = path.parent().unwrap_or(Path::new("."));
            config.scripts_dir = Some(if dir.is_relative() {
                base.join(dir)
            } else {
                dir
            });
        }

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Resolve the scripts directory
    ///
    /// A directory given on the command line wins over the config file,
    /// which wins over `scripts/` next to the executable.
    pub fn scripts_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.scripts_dir.clone())
            .unwrap_or_else(default_scripts_dir)
    }
}
