//! Game settings
//!
//! Loaded from a JSON file named by `QUICK_SUMS_SETTINGS`; every field is
//! optional and falls back to the defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::Level;

/// Tunable game rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Time limits (seconds per question) ===
    pub level_one_seconds: u32,
    pub level_two_seconds: u32,
    pub level_three_seconds: u32,

    // === Progression ===
    /// Correct answers on a level before moving up
    pub answers_per_level: u32,
    /// Mistakes that end the game
    pub max_mistakes: u32,

    /// Fixed RNG seed for reproducible sessions; random when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level_one_seconds: LEVEL_ONE_SECONDS,
            level_two_seconds: LEVEL_TWO_SECONDS,
            level_three_seconds: LEVEL_THREE_SECONDS,
            answers_per_level: ANSWERS_PER_LEVEL,
            max_mistakes: MAX_MISTAKES,
            seed: None,
        }
    }
}

impl Settings {
    /// Environment variable holding the settings file path
    pub const PATH_ENV: &'static str = "QUICK_SUMS_SETTINGS";

    /// Seconds allowed per question on `level`
    pub fn time_limit(&self, level: Level) -> u32 {
        match level {
            Level::One => self.level_one_seconds,
            Level::Two => self.level_two_seconds,
            Level::Three => self.level_three_seconds,
        }
    }

    /// Reject values that would make the game unplayable
    pub fn validate(&self) -> Result<(), SettingsError> {
        for level in Level::ALL {
            if self.time_limit(level) == 0 {
                return Err(SettingsError::Invalid(format!(
                    "time limit for level {level} must be at least one second"
                )));
            }
        }
        if self.answers_per_level == 0 {
            return Err(SettingsError::Invalid(
                "answers_per_level must be at least 1".into(),
            ));
        }
        if self.max_mistakes == 0 {
            return Err(SettingsError::Invalid(
                "max_mistakes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from the file named by `QUICK_SUMS_SETTINGS`
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!(
                    "Ignoring settings file {}: {e}",
                    Path::new(&path).display()
                );
                Self::default()
            }
        }
    }
}
