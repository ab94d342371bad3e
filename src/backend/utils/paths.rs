//! Path utilities.

use std::path::PathBuf;

use anyhow::Result;

/// Name of the application data directory.
const APP_DIR: &str = "InmoPortal";

/// Overrides the data directory, mainly for portable installs and tests.
const APP_DIR_ENV: &str = "INMO_PORTAL_HOME";

/// Get the base application directory (`InmoPortal`).
#[inline]
pub fn get_app_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(APP_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let base_dir = match std::env::consts::OS {
        "windows" => std::env::var("APPDATA")
            .ok()
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("Could not determine AppData directory"))?,
        "macos" => std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?,
        _ => std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".local/share"))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?,
    };
    Ok(base_dir.join(APP_DIR))
}

/// Get the path of the configuration file.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.json"))
}

/// Get the default path of the persisted session.
pub fn get_session_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("session.json"))
}
