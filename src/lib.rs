//! Sword Reflex - A reflex point-and-click minigame
//!
//! Core modules:
//! - `sim`: Deterministic game logic (scoring, combo, spawn timing, session)
//! - `catalog`: Sword upgrade tiers and cumulative bonus lookup
//! - `persistence`: Key-value storage backends and the versioned player profile
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance
//! - `settings`: Player feedback preferences
//! - `game`: Controller tying the simulation to storage

pub mod catalog;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use catalog::{Catalog, UpgradeTier};
pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Storage key of the versioned player profile
    pub const PROFILE_KEY: &str = "sword_reflex_profile";
    /// Storage key of the feedback settings
    pub const SETTINGS_KEY: &str = "sword_reflex_settings";

    /// Legacy per-key layout (pre-envelope saves)
    pub const LEGACY_SCORE_KEY: &str = "score";
    pub const LEGACY_RECORD_KEY: &str = "record";
    pub const LEGACY_EQUIPPED_KEY: &str = "equippedSword";

    /// Current profile schema version
    pub const PROFILE_VERSION: u32 = 1;

    /// Fallback target edge length when the front end can't measure it (px)
    pub const DEFAULT_TARGET_SIZE: f32 = 60.0;
    /// Default play area (px), replaced by the real bounds on resize
    pub const DEFAULT_AREA_WIDTH: f32 = 600.0;
    pub const DEFAULT_AREA_HEIGHT: f32 = 400.0;

    /// Number of particles per burst
    pub const PARTICLE_COUNT: u32 = 10;
}
