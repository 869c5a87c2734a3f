// ---------------------------------------------------------------------------
// Settings: overlay props from JSON files and the environment
// ---------------------------------------------------------------------------

use std::fmt;
use std::path::Path;

use bevy::log::{info, warn};

use crate::overlay::{MotionPreference, OverlayProps};

/// Path of a JSON props file read at startup.
pub const CONFIG_ENV: &str = "WEATHERFX_CONFIG";

/// `1`/`true`/`yes`/`on` marks the system as preferring reduced motion.
pub const REDUCED_MOTION_ENV: &str = "WEATHERFX_REDUCED_MOTION";

/// Errors that can occur while loading overlay settings.
#[derive(Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    Io(std::io::Error),
    /// The file is not valid props JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "Invalid overlay settings: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Parse props JSON. Missing fields take their defaults.
pub fn parse_props(json: &str) -> Result<OverlayProps, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_props(path: impl AsRef<Path>) -> Result<OverlayProps, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    parse_props(&text)
}

/// Props from the file named by `WEATHERFX_CONFIG`, or defaults when it is
/// unset or unreadable.
pub fn props_from_env() -> OverlayProps {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return OverlayProps::default();
    };
    match load_props(&path) {
        Ok(props) => {
            info!("Loaded overlay settings from {path}");
            props
        }
        Err(e) => {
            warn!("Ignoring {CONFIG_ENV}={path}: {e}");
            OverlayProps::default()
        }
    }
}

pub fn motion_preference_from_env() -> MotionPreference {
    MotionPreference {
        prefers_reduced_motion: std::env::var(REDUCED_MOTION_ENV)
            .map(|v| is_truthy(&v))
            .unwrap_or(false),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
