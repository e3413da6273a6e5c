//! Game settings and tuning
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Color;
use crate::consts::*;
use crate::sim::camera::{Camera, Viewport};

/// Errors while reading or writing a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Flight time of the first ship of a round (seconds)
    pub initial_duration: f32,
    /// Multiplier applied to the flight time after each hit
    pub shrink_factor: f32,
    /// Optional lower bound on flight time. Off by default.
    pub min_duration: Option<f32>,
    /// Points awarded per hit
    pub score_per_hit: u32,
    /// Spawn x/y half extent
    pub spawn_half_extent: f32,
    /// Spawn z
    pub spawn_depth: f32,
    /// Ship pick radius
    pub target_radius: f32,
    /// Emission colour flashed on non-target taps
    pub highlight_color: Color,
    /// Seconds before the flash reverts
    pub highlight_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_duration: INITIAL_DURATION,
            shrink_factor: DURATION_SHRINK,
            min_duration: None,
            score_per_hit: SCORE_PER_HIT,
            spawn_half_extent: SPAWN_HALF_EXTENT,
            spawn_depth: SPAWN_DEPTH,
            target_radius: TARGET_RADIUS,
            highlight_color: Color::RED,
            highlight_duration: HIGHLIGHT_DURATION,
        }
    }
}

impl Tuning {
    /// Reject values that would break the round rules: flight time must
    /// start positive and strictly shrink, and each hit scores exactly one.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.initial_duration > 0.0 && self.initial_duration.is_finite()) {
            return Err(SettingsError::Invalid(format!(
                "initial_duration must be positive, got {}",
                self.initial_duration
            )));
        }
        if !(self.shrink_factor > 0.0 && self.shrink_factor < 1.0) {
            return Err(SettingsError::Invalid(format!(
                "shrink_factor must be in (0, 1), got {}",
                self.shrink_factor
            )));
        }
        if self.score_per_hit != SCORE_PER_HIT {
            return Err(SettingsError::Invalid(format!(
                "score_per_hit must be {SCORE_PER_HIT}, got {}",
                self.score_per_hit
            )));
        }
        if let Some(floor) = self.min_duration {
            if !(floor > 0.0 && floor.is_finite()) {
                return Err(SettingsError::Invalid(format!(
                    "min_duration must be positive, got {floor}"
                )));
            }
        }
        if !(self.target_radius > 0.0) || !(self.highlight_duration >= 0.0) {
            return Err(SettingsError::Invalid(
                "target_radius must be positive and highlight_duration non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Flight time after one more hit
    pub fn next_duration(&self, current: f32) -> f32 {
        let next = current * self.shrink_factor;
        match self.min_duration {
            Some(floor) => next.max(floor),
            None => next,
        }
    }
}

/// Autoplay demo options for the native binary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Rounds to play before exiting
    pub rounds: u32,
    /// Mean reaction time in seconds
    pub reaction_time: f32,
    /// Uniform jitter applied to the reaction time
    pub reaction_jitter: f32,
    /// Chance per spawn of tapping a prop instead of waiting
    pub distraction_chance: f64,
    /// Seconds to wait on the game-over screen before restarting
    pub restart_delay: f32,
    /// Number of decorative props placed around the arena
    pub props: u32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            rounds: 3,
            reaction_time: 0.9,
            reaction_jitter: 0.3,
            distraction_chance: 0.2,
            restart_delay: 1.0,
            props: 4,
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub camera: Camera,
    pub demo: DemoSettings,
    /// Where best scores are kept; `None` disables persistence
    pub highscores_path: Option<PathBuf>,
    /// Log scene statistics every second
    pub show_statistics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tuning: Tuning::default(),
            viewport: Viewport::default(),
            camera: Camera::default(),
            demo: DemoSettings::default(),
            highscores_path: None,
            show_statistics: true,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.initial_duration, 5.0);
        assert_eq!(tuning.shrink_factor, 0.9);
        assert_eq!(tuning.score_per_hit, 1);
        assert!(tuning.min_duration.is_none());
    }

    #[test]
    fn test_next_duration_without_floor() {
        let tuning = Tuning::default();
        assert!((tuning.next_duration(5.0) - 4.5).abs() < 1e-6);
        assert!(tuning.next_duration(0.001) < 0.001);
    }

    #[test]
    fn test_next_duration_with_floor() {
        let tuning = Tuning {
            min_duration: Some(1.0),
            ..Tuning::default()
        };
        assert_eq!(tuning.next_duration(1.05), 1.0);
        assert!((tuning.next_duration(2.0) - 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "seed": 42, "tuning": { "initial_duration": 3.0 } }"#)
                .unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.tuning.initial_duration, 3.0);
        assert_eq!(settings.tuning.shrink_factor, 0.9);
        assert_eq!(settings.demo.rounds, 3);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_growing_shrink_factor() {
        let err = Settings::from_json(r#"{ "tuning": { "shrink_factor": 1.5 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        let err = Settings::from_json(r#"{ "tuning": { "shrink_factor": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        let err = Settings::from_json(r#"{ "tuning": { "shrink_factor": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_non_positive_initial_duration() {
        let err =
            Settings::from_json(r#"{ "tuning": { "initial_duration": -2.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        let err = Settings::from_json(r#"{ "tuning": { "initial_duration": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_other_score_increments() {
        for bad in [0, 2] {
            let json = format!(r#"{{ "tuning": {{ "score_per_hit": {bad} }} }}"#);
            let err = Settings::from_json(&json).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid(_)));
        }
    }

    #[test]
    fn test_rejects_non_positive_floor() {
        let err = Settings::from_json(r#"{ "tuning": { "min_duration": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("ship-tap-bad-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"tuning":{"shrink_factor":1.5,"score_per_hit":0,"initial_duration":-2.0}}"#,
        )
        .unwrap();
        let settings = Settings::load(Some(&path));
        let _ = fs::remove_file(&path);
        assert_eq!(settings.tuning.initial_duration, INITIAL_DURATION);
        assert_eq!(settings.tuning.shrink_factor, DURATION_SHRINK);
        assert_eq!(settings.tuning.score_per_hit, SCORE_PER_HIT);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from(Path::new("/nonexistent/ship-tap.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let settings = Settings::load(Some(Path::new("/nonexistent/ship-tap.json")));
        assert_eq!(settings.tuning.initial_duration, INITIAL_DURATION);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("ship-tap-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.seed = Some(7);
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.seed, Some(7));
    }
}
