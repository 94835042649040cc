//! Game settings and preferences
//!
//! Persisted through the prefix-namespaced store, separately from
//! statistics and high scores.

use serde::{Deserialize, Serialize};

use crate::storage::Store;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Visual effects ===
    /// Particle effects (crashes, shield blocks, pickups)
    pub particles: bool,
    /// Particle cap when enabled
    pub max_particles: usize,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (disables particle bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            max_particles: 256,
            show_fps: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Store key
    const KEY: &'static str = "settings";

    /// Effective particle cap (respects toggle and reduced motion)
    pub fn effective_max_particles(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            self.max_particles
        }
    }

    /// Load from the store, falling back to defaults
    pub fn load(store: &Store) -> Self {
        match store.get(Self::KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Persist, best-effort
    pub fn save(&self, store: &Store) {
        store.set(Self::KEY, self);
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults_when_missing() {
        let store = Store::in_memory();
        let settings = Settings::load(&store);
        assert!(settings.particles);
        assert_eq!(settings.max_particles, 256);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let store = Store::in_memory();
        let mut settings = Settings::default();
        settings.show_fps = false;
        settings.master_volume = 0.25;
        settings.save(&store);

        let loaded = Settings::load(&store);
        assert!(!loaded.show_fps);
        assert!((loaded.master_volume - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_reduced_motion_disables_particles() {
        let mut settings = Settings::default();
        settings.reduced_motion = true;
        assert_eq!(settings.effective_max_particles(), 0);
    }
}
