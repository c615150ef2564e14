//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web and in `pong_settings.json` natively.
//! Controls and resolution are fixed.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all cues
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Simulation ===
    /// Fixed RNG seed for reproducible serves; time-derived when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            show_fps: false,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pong_settings";

    /// Settings file, relative to the working directory
    #[allow(dead_code)]
    const FILE_NAME: &'static str = "pong_settings.json";

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Parse settings JSON, clamping out-of-range volumes
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Seed to use for a new game
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring bad settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::FILE_NAME);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring bad {}: {}", Self::FILE_NAME, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Normalize an existing settings file in place; never creates one
    #[cfg(not(target_arch = "wasm32"))]
    pub fn rewrite_stored(&self) -> bool {
        self.rewrite_at(std::path::Path::new(Self::FILE_NAME))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn rewrite_at(&self, path: &std::path::Path) -> bool {
        if !path.is_file() {
            return false;
        }
        self.save_to(path)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save_to(&self, path: &std::path::Path) -> bool {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => {
                    log::info!("Settings saved to {}", path.display());
                    true
                }
                Err(e) => {
                    log::warn!("Failed to write {}: {}", path.display(), e);
                    false
                }
            },
            Err(e) => {
                log::warn!("Failed to serialize settings: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);

        settings.sfx_volume = 0.5;
        assert!((settings.effective_volume() - 0.4).abs() < 1e-6);

        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"muted": true, "seed": 42}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.master_volume, 0.8);
        assert!(settings.mute_on_blur);
    }

    #[test]
    fn test_volumes_clamped() {
        let settings =
            Settings::from_json(r#"{"master_volume": 3.0, "sfx_volume": -1.0}"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{"muted": "yes"}"#).is_err());
    }

    #[test]
    fn test_seed_or() {
        let mut settings = Settings::default();
        assert_eq!(settings.seed_or(7), 7);
        settings.seed = Some(3);
        assert_eq!(settings.seed_or(7), 3);
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            muted: true,
            seed: Some(9),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_rewrite_only_touches_existing_file() {
        let path = std::env::temp_dir().join(format!(
            "pong_settings_rewrite_{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        };

        assert!(!settings.rewrite_at(&path));
        assert!(!path.exists());

        std::fs::write(&path, r#"{"master_volume": 4.0}"#).unwrap();
        assert!(settings.rewrite_at(&path));
        let stored = Settings::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored, settings);

        std::fs::remove_file(&path).unwrap();
    }
}
