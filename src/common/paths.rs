//! Scripts directory and configuration paths

use std::path::PathBuf;

/// Name used for the configuration directory
const APP_NAME: &str = "ci-prepare";

/// Name of the directory holding the step scripts, next to the executable
const SCRIPTS_DIR_NAME: &str = "scripts";

/// Get the default scripts directory
///
/// Scripts live in a `scripts` directory next to the running executable.
/// Falls back to `./scripts` if the executable path cannot be determined.
pub fn default_scripts_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));

    match exe_dir {
        Some(dir) => dir.join(SCRIPTS_DIR_NAME),
        None => {
            tracing::warn!("could not determine executable location, using ./{SCRIPTS_DIR_NAME}");
            PathBuf::from(SCRIPTS_DIR_NAME)
        }
    }
}

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/ci-prepare/`
/// - macOS: `~/Library/Application Support/ci-prepare/`
/// - Windows: `%APPDATA%\ci-prepare\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
