//! Versioned player profile
//!
//! Stored as a single JSON envelope:
//! `{"version":1,"score":150,"record":200,"equippedSword":3}`.
//! Older saves kept each scalar under its own key (`score`, `record`,
//! `equippedSword`); those are migrated into the envelope on first load.

use serde::{Deserialize, Serialize};

use super::gateway::Gateway;
use super::store::{KeyValueStore, StoreError};
use crate::consts::*;

/// Progression that survives reloads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Current coin balance (never clamped, may go negative)
    #[serde(default)]
    pub score: i64,
    /// Best balance ever reached
    #[serde(default)]
    pub record: i64,
    /// Highest owned upgrade tier, 0 = none
    #[serde(default, rename = "equippedSword")]
    pub equipped_tier: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    #[serde(flatten)]
    profile: Profile,
}

impl Profile {
    /// Restore invariants on data that came from storage
    pub fn sanitized(mut self, catalog_len: u32) -> Self {
        if self.record < self.score {
            self.record = self.score;
        }
        if self.record < 0 {
            self.record = 0;
        }
        self.equipped_tier = self.equipped_tier.min(catalog_len);
        self
    }

    /// Load the profile, migrating the legacy per-key layout if needed
    pub fn load<S: KeyValueStore>(gateway: &mut Gateway<S>, catalog_len: u32) -> Self {
        if let Some(envelope) = gateway.load_opt::<Envelope>(PROFILE_KEY) {
            if envelope.version > PROFILE_VERSION {
                log::warn!(
                    "Profile version {} is newer than supported {}, reading known fields",
                    envelope.version,
                    PROFILE_VERSION
                );
            }
            let profile = envelope.profile.sanitized(catalog_len);
            log::info!(
                "Loaded profile (score {}, record {}, tier {})",
                profile.score,
                profile.record,
                profile.equipped_tier
            );
            return profile;
        }

        let has_legacy = [LEGACY_SCORE_KEY, LEGACY_RECORD_KEY, LEGACY_EQUIPPED_KEY]
            .iter()
            .any(|key| gateway.contains(key));
        if !has_legacy {
            log::info!("No profile found, starting fresh");
            return Self::default();
        }

        let profile = Self::migrate_legacy(gateway).sanitized(catalog_len);
        match profile.save(gateway) {
            Ok(()) => {
                for key in [LEGACY_SCORE_KEY, LEGACY_RECORD_KEY, LEGACY_EQUIPPED_KEY] {
                    if let Err(err) = gateway.clear(key) {
                        log::warn!("Failed to remove legacy key {key:?}: {err}");
                    }
                }
                log::info!("Migrated legacy profile to version {}", PROFILE_VERSION);
            }
            Err(err) => log::warn!("Failed to write migrated profile: {err}"),
        }
        profile
    }

    fn migrate_legacy<S: KeyValueStore>(gateway: &Gateway<S>) -> Self {
        Self {
            score: gateway.load(LEGACY_SCORE_KEY, 0),
            record: gateway.load(LEGACY_RECORD_KEY, 0),
            equipped_tier: gateway.load(LEGACY_EQUIPPED_KEY, 0),
        }
    }

    pub fn save<S: KeyValueStore>(&self, gateway: &mut Gateway<S>) -> Result<(), StoreError> {
        gateway.save(
            PROFILE_KEY,
            &Envelope {
                version: PROFILE_VERSION,
                profile: *self,
            },
        )
    }

    /// Clear score and tier, keep the record
    pub fn reset(&mut self) {
        self.score = 0;
        self.equipped_tier = 0;
    }

    /// Drop the legacy score/tier keys so an old save can't resurface them
    pub fn clear_legacy<S: KeyValueStore>(gateway: &mut Gateway<S>) -> Result<(), StoreError> {
        gateway.clear(LEGACY_SCORE_KEY)?;
        gateway.clear(LEGACY_EQUIPPED_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_clear_legacy_keeps_record_key() {
        let mut store = MemoryStore::new();
        store.set("score", "5").unwrap();
        store.set("record", "9").unwrap();
        store.set("equippedSword", "1").unwrap();
        let mut gateway = Gateway::new(store);
        Profile::clear_legacy(&mut gateway).unwrap();
        assert!(!gateway.contains("score"));
        assert!(!gateway.contains("equippedSword"));
        assert!(gateway.contains("record"));
    }

    #[test]
    fn test_fresh_profile_defaults_to_zero() {
        let mut gateway = Gateway::new(MemoryStore::new());
        assert_eq!(Profile::load(&mut gateway, 6), Profile::default());
        // Nothing written for a fresh start
        assert!(gateway.store().is_empty());
    }

    #[test]
    fn test_envelope_roundtrip_uses_legacy_field_name() {
        let mut gateway = Gateway::new(MemoryStore::new());
        let profile = Profile {
            score: 150,
            record: 200,
            equipped_tier: 3,
        };
        profile.save(&mut gateway).unwrap();

        let raw = gateway.store().get(PROFILE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["equippedSword"], 3);

        assert_eq!(Profile::load(&mut gateway, 6), profile);
    }

    #[test]
    fn test_migrates_legacy_keys() {
        let mut store = MemoryStore::new();
        store.set("score", "35").unwrap();
        store.set("record", "90").unwrap();
        store.set("equippedSword", "2").unwrap();
        let mut gateway = Gateway::new(store);

        let profile = Profile::load(&mut gateway, 6);
        assert_eq!(
            profile,
            Profile {
                score: 35,
                record: 90,
                equipped_tier: 2
            }
        );
        assert!(!gateway.contains("score"));
        assert!(!gateway.contains("equippedSword"));
        assert!(gateway.contains(PROFILE_KEY));

        // Second load reads the envelope
        assert_eq!(Profile::load(&mut gateway, 6), profile);
    }

    #[test]
    fn test_partial_and_corrupt_legacy_keys_default() {
        let mut store = MemoryStore::new();
        store.set("record", "not-a-number").unwrap();
        store.set("score", "12").unwrap();
        let mut gateway = Gateway::new(store);

        let profile = Profile::load(&mut gateway, 6);
        assert_eq!(profile.score, 12);
        // Corrupt record falls back to 0, then is raised to the score
        assert_eq!(profile.record, 12);
        assert_eq!(profile.equipped_tier, 0);
    }

    #[test]
    fn test_corrupt_envelope_falls_back() {
        let mut store = MemoryStore::new();
        store.set(PROFILE_KEY, "{\"version\": \"x\"").unwrap();
        let mut gateway = Gateway::new(store);
        assert_eq!(Profile::load(&mut gateway, 6), Profile::default());
    }

    #[test]
    fn test_sanitize_clamps_tier_and_record() {
        let profile = Profile {
            score: 500,
            record: 100,
            equipped_tier: 99,
        }
        .sanitized(6);
        assert_eq!(profile.record, 500);
        assert_eq!(profile.equipped_tier, 6);

        let negative = Profile {
            score: -8,
            record: -3,
            equipped_tier: 0,
        }
        .sanitized(6);
        assert_eq!(negative.score, -8);
        assert_eq!(negative.record, 0);
    }

    #[test]
    fn test_reset_keeps_record() {
        let mut gateway = Gateway::new(MemoryStore::new());
        let mut profile = Profile {
            score: 150,
            record: 200,
            equipped_tier: 3,
        };
        profile.save(&mut gateway).unwrap();
        profile.reset();
        profile.save(&mut gateway).unwrap();

        let expected = Profile {
            score: 0,
            record: 200,
            equipped_tier: 0,
        };
        assert_eq!(profile, expected);
        assert_eq!(Profile::load(&mut gateway, 6), expected);
    }
}
