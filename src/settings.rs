//! Game settings and preferences
//!
//! Persisted separately from the profile under its own key.

use serde::{Deserialize, Serialize};

use crate::config::{Difficulty, GameConfig};
use crate::persistence::PersistenceError;
use crate::platform::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tier preselected in the level menu (last one played)
    pub difficulty: Difficulty,
    /// Particle bursts on coin pickup
    pub particles: bool,
    /// Reduced motion (no particles, no glitch animation)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "rd_settings";

    /// Effective particles (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Session config for the preferred difficulty with these settings applied
    pub fn game_config(&self) -> GameConfig {
        let mut config = GameConfig::for_difficulty(self.difficulty);
        self.apply(&mut config);
        config
    }

    /// Apply presentation preferences to a session config
    pub fn apply(&self, config: &mut GameConfig) {
        if !self.effective_particles() {
            config.particle_burst = 0;
        }
    }

    /// Load settings; missing or malformed values fall back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_reduced_motion_disables_particles() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert_eq!(settings.game_config().particle_burst, 0);
        assert!(Settings::default().game_config().particle_burst > 0);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            difficulty: Difficulty::Hard,
            particles: false,
            reduced_motion: false,
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_partial_settings_keep_defaults() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, r#"{"difficulty":"Easy"}"#).unwrap();
        let settings = Settings::load(&store);
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert!(settings.particles);
    }
}
