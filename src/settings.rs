//! Game settings and preferences
//!
//! Read from a JSON file next to the binary; missing fields take their
//! defaults so old files keep working.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed; a fresh one is drawn from the clock when unset
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Leaderboard ===
    pub leaderboard_path: String,
    /// Name recorded with qualifying scores
    pub player_name: String,

    // === Demo run ===
    /// Tick cap for the headless run
    pub demo_ticks: u64,
    /// Let the AI fly
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,

            leaderboard_path: "leaderboard.txt".to_string(),
            player_name: "PLAYER".to_string(),

            // Five minutes of flight
            demo_ticks: 60 * 60 * 5,
            autopilot: true,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults if the file is missing or broken
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "cave-flyer-settings-{tag}-{}.json",
            std::process::id()
        ))
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("rt");
        let settings = Settings {
            seed: Some(77),
            muted: true,
            player_name: "ZED".to_string(),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"seed": 5}"#).unwrap();
        assert_eq!(settings.seed, Some(5));
        assert_eq!(settings.master_volume, 0.8);
        assert!(settings.autopilot);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let path = temp_path("broken");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(Error::Json(_))));
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert!(matches!(Settings::load_from(&path), Err(Error::Io(_))));
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
