//! Runtime settings
//!
//! Loaded from an optional JSON file; the binary then applies its CLI flags
//! on top.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PLAYERS;
use crate::sim::LayoutKind;

/// Failure to read or parse a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Parsed fine but holds a value the game cannot use
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "cannot read settings: {}", e),
            SettingsError::Json(e) => write!(f, "malformed settings: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Players in a round (1 or 2)
    pub players: usize,
    /// Which maze to play
    pub layout: LayoutKind,
    /// RNG seed for vulnerable ghosts' random turns
    pub seed: u64,
    /// Let the autopilot play
    pub idle_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            players: 1,
            layout: LayoutKind::Classic,
            seed: 0,
            idle_mode: false,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=MAX_PLAYERS).contains(&self.players) {
            return Err(SettingsError::Invalid(format!(
                "players must be between 1 and {}, got {}",
                MAX_PLAYERS, self.players
            )));
        }
        Ok(())
    }
}
