//! Player feedback preferences
//!
//! Persisted separately from the profile. The simulation always emits its
//! feedback events; the front end consults these before acting on them.

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_KEY;
use crate::persistence::{Gateway, KeyValueStore, StoreError};

/// Feedback settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Particle burst on successful hits
    pub particles: bool,
    /// Shake the play area on penalties
    pub screen_shake: bool,
    /// Flash the combo banner while the combo is active
    pub combo_flash: bool,

    // === HUD ===
    /// How long a notification stays on screen (ms)
    pub notification_ms: u32,

    // === Accessibility ===
    /// Reduced motion (no shake, no flashing)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            screen_shake: true,
            combo_flash: true,
            notification_ms: 2000,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective combo flash (respects reduced_motion)
    pub fn effective_combo_flash(&self) -> bool {
        self.combo_flash && !self.reduced_motion
    }

    pub fn effective_particles(&self) -> bool {
        self.particles
    }

    /// Load settings, falling back to defaults
    pub fn load<S: KeyValueStore>(gateway: &Gateway<S>) -> Self {
        match gateway.load_opt::<Settings>(SETTINGS_KEY) {
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

    pub fn save<S: KeyValueStore>(&self, gateway: &mut Gateway<S>) -> Result<(), StoreError> {
        gateway.save(SETTINGS_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
