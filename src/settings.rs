//! Game settings and preferences
//!
//! Loaded from a JSON file next to the executable. Missing keys fall back to
//! defaults, and a missing or broken file falls back to `Settings::default()`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_H, SCREEN_W, TITLE};
use crate::tuning::Tuning;

/// Per-cue playback volumes (0.0 - 1.0)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Volumes {
    pub master: f32,
    pub music: f32,
    pub start: f32,
    pub pickup: f32,
    pub death: f32,
    pub muted: bool,
}

impl Default for Volumes {
    fn default() -> Self {
        Self {
            master: 1.0,
            music: 0.25,
            start: 0.5,
            pickup: 0.35,
            death: 0.6,
            muted: false,
        }
    }
}

impl Volumes {
    /// Final volume for a cue after master and mute
    pub fn effective(&self, cue_volume: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (cue_volume * self.master).clamp(0.0, 1.0)
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    pub screen_width: f32,
    pub screen_height: f32,

    /// Directory holding `levels.csv` or `levelsNN.json`
    pub data_dir: PathBuf,
    /// Directory holding `models/`, `textures/` and `audio/`
    pub assets_dir: PathBuf,
    /// Highest level for sources that cannot count their own levels
    pub level_max: u32,

    pub volumes: Volumes,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            screen_width: SCREEN_W,
            screen_height: SCREEN_H,
            data_dir: PathBuf::from("data"),
            assets_dir: PathBuf::from("assets"),
            level_max: 5,
            volumes: Volumes::default(),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Half the viewport, used to center the camera on the player
    pub fn half_viewport(&self) -> glam::Vec2 {
        glam::Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Bad settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings.level_max, 5);
        assert_eq!(settings.screen_width, 960.0);
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.volumes.music, 0.25);
    }

    #[test]
    fn test_save_and_load_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "level_max": 3, "tuning": { "enemy_speed": 140.0 } }"#)
            .unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.level_max, 3);
        assert_eq!(settings.tuning.enemy_speed, 140.0);
        assert_eq!(settings.tuning.oxygen_hit_loss, 18.0);

        settings.save_to(&path).unwrap();
        let reloaded = Settings::load_from(&path);
        assert_eq!(reloaded.level_max, 3);
    }

    #[test]
    fn test_inconsistent_effect_ranges_do_not_panic() {
        use crate::sim::EffectSystem;
        use rand::SeedableRng;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "tuning": { "effects": { "lifetime_min": 0.6, "particle_speed": -10.0 } } }"#,
        )
        .unwrap();
        let settings = Settings::load_from(&path);

        let mut fx = EffectSystem::new(settings.tuning.effects.clone());
        let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
        fx.spawn(glam::Vec2::ZERO, crate::palette::BARN_RED);
        for _ in 0..10 {
            fx.update(1.0 / 60.0, &mut rng);
        }
        assert!(fx.particle_count() > 0);
    }

    #[test]
    fn test_muted_volume_is_zero() {
        let volumes = Volumes {
            muted: true,
            ..Volumes::default()
        };
        assert_eq!(volumes.effective(0.6), 0.0);
        assert!((Volumes::default().effective(0.6) - 0.6).abs() < 1e-6);
    }
}
