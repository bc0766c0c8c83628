//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/flux-counter/`
//! - macOS: `~/Library/Application Support/flux-counter/`
//! - Windows: `%APPDATA%\flux-counter\`

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const APP_NAME: &str = "flux-counter";

/// Get the application config directory (not created if missing)
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to app config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
