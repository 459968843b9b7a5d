//! Host driver settings
//!
//! Loaded from an optional JSON file, then overridden by environment
//! variables. Gameplay tuning is fixed in [`crate::consts`]; these only
//! control how the headless driver runs a simulation.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::Mode;
use crate::{Error, Result};

/// Env var naming a JSON settings file
pub const SETTINGS_PATH_VAR: &str = "ARENA_SETTINGS";

/// Headless driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; random when absent
    pub seed: Option<u64>,
    /// Mode name (classic, chaos, endless, training)
    pub mode: String,
    /// Simulated render frames per second
    pub frame_rate: u32,
    /// Longest frame the driver will feed the simulation (seconds)
    pub max_frame_dt: f32,
    /// Simulated wall-clock seconds to run
    pub duration_secs: f32,
    /// Print a JSON snapshot every N frames (0 = never)
    pub snapshot_every: u32,
    /// Steer the player away from threats instead of idling
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            mode: "classic".to_string(),
            frame_rate: 60,
            max_frame_dt: 0.1,
            duration_secs: 60.0,
            snapshot_every: 0,
            autopilot: true,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// File named by `ARENA_SETTINGS` (or defaults), then env overrides
    pub fn load() -> Result<Self> {
        let mut settings = match env::var(SETTINGS_PATH_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        };
        settings.apply_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// `ARENA_MODE`, `ARENA_SEED`, `ARENA_DURATION`
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(mode) = env::var("ARENA_MODE") {
            self.mode = mode;
        }
        if let Ok(seed) = env::var("ARENA_SEED") {
            let seed = seed
                .parse()
                .map_err(|_| Error::Config(format!("ARENA_SEED is not a u64: {seed:?}")))?;
            self.seed = Some(seed);
        }
        if let Ok(secs) = env::var("ARENA_DURATION") {
            self.duration_secs = secs
                .parse()
                .map_err(|_| Error::Config(format!("ARENA_DURATION is not a number: {secs:?}")))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            return Err(Error::Config("frame_rate must be positive".into()));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(Error::Config("max_frame_dt must be positive".into()));
        }
        if !(self.duration_secs > 0.0) {
            return Err(Error::Config("duration_secs must be positive".into()));
        }
        Ok(())
    }

    /// Parsed mode; unknown names are an error
    pub fn mode(&self) -> Result<Mode> {
        self.mode.parse()
    }

    /// Frame time the driver feeds the simulation
    pub fn frame_dt(&self) -> f32 {
        (1.0 / self.frame_rate as f32).min(self.max_frame_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.mode().unwrap(), Mode::Classic);
        assert!((settings.frame_dt() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json_str(r#"{ "mode": "endless", "seed": 5 }"#).unwrap();
        assert_eq!(settings.mode().unwrap(), Mode::Endless);
        assert_eq!(settings.seed, Some(5));
        assert_eq!(settings.frame_rate, 60);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Settings::from_json_str(r#"{ "frame_rate": 0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Settings::from_json_str(r#"{ "duration_secs": -1.0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Settings::from_json_str("not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_unknown_mode_is_error() {
        let settings = Settings {
            mode: "arcade".into(),
            ..Default::default()
        };
        assert!(matches!(settings.mode(), Err(Error::UnknownMode(_))));
    }

    #[test]
    fn test_frame_dt_capped() {
        let settings = Settings {
            frame_rate: 5,
            max_frame_dt: 0.1,
            ..Default::default()
        };
        assert!((settings.frame_dt() - 0.1).abs() < 1e-6);
    }
}
