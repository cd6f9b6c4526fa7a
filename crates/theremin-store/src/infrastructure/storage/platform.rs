//! Platform-appropriate location of the config file.
//!
//! - Windows:  `%APPDATA%\Theremin\synth_config.json`
//! - Linux:    `$XDG_CONFIG_HOME/theremin/synth_config.json`
//!   (falling back to `~/.config/theremin/synth_config.json`)
//! - macOS:    `~/Library/Application Support/Theremin/synth_config.json`

use std::path::PathBuf;

use thiserror::Error;

/// File name of the config blob inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "synth_config.json";

/// Error type for platform path resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,
}

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`PlatformError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    platform_config_dir().ok_or(PlatformError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`PlatformError::NoPlatformConfigDir`] if the base directory
/// cannot be determined.
pub fn config_file_path() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Theremin"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("theremin"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Theremin")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}
