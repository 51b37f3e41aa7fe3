//! Data-driven game balance
//!
//! Every reward, penalty and timer duration lives here so balance changes
//! never touch the simulation code. Defaults are the reference values.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Environment variable pointing at a JSON tuning override
pub const TUNING_PATH_ENV: &str = "SWORD_REFLEX_TUNING";

/// Reaction times up to `max_ms` (inclusive) earn `points`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionBand {
    pub max_ms: u64,
    pub points: i64,
}

/// Width/height pair in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Reaction bands, ascending by `max_ms`
    pub reaction_bands: Vec<ReactionBand>,
    /// Points for a hit slower than every band
    pub slow_points: i64,
    /// Points when the target expires untouched
    pub timeout_points: i64,
    /// How long a target stays up (ms)
    pub spawn_window_ms: u64,
    /// Pause between a hit and the next target (ms)
    pub respawn_delay_ms: u64,
    /// Consecutive hits needed to engage the combo
    pub combo_threshold: u32,
    /// Sliding inactivity window before the combo drops (ms)
    pub combo_decay_ms: u64,
    /// Multiplier applied to positive gains while the combo is active
    pub combo_multiplier: i64,
    /// Target size
    pub target: Extent,
    /// Play area used until the front end reports real bounds
    pub area: Extent,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reaction_bands: vec![
                ReactionBand { max_ms: 600, points: 3 },
                ReactionBand { max_ms: 1000, points: 2 },
                ReactionBand { max_ms: 1500, points: 1 },
            ],
            slow_points: -1,
            timeout_points: -2,
            spawn_window_ms: 1500,
            respawn_delay_ms: 120,
            combo_threshold: 3,
            combo_decay_ms: 2500,
            combo_multiplier: 2,
            target: Extent::new(DEFAULT_TARGET_SIZE, DEFAULT_TARGET_SIZE),
            area: Extent::new(DEFAULT_AREA_WIDTH, DEFAULT_AREA_HEIGHT),
        }
    }
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON tuning file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = fs::read_to_string(path).map_err(|source| TuningError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !self
            .reaction_bands
            .windows(2)
            .all(|w| w[0].max_ms < w[1].max_ms)
        {
            return Err(TuningError::Invalid("reaction bands must be strictly ascending"));
        }
        if self.combo_threshold == 0 {
            return Err(TuningError::Invalid("combo threshold must be at least 1"));
        }
        if self.combo_multiplier < 1 {
            return Err(TuningError::Invalid("combo multiplier must be at least 1"));
        }
        if self.spawn_window_ms == 0 {
            return Err(TuningError::Invalid("spawn window must be non-zero"));
        }
        Ok(())
    }
}

/// Load tuning from `SWORD_REFLEX_TUNING`, falling back to defaults
pub fn load_tuning_from_env() -> Tuning {
    let Some(path) = env::var(TUNING_PATH_ENV).ok().map(PathBuf::from) else {
        return Tuning::default();
    };

    match Tuning::load(&path) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path.display());
            tuning
        }
        Err(err) => {
            log::warn!("Tuning load failed ({}), using defaults", err);
            Tuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"spawn_window_ms": 900, "combo_threshold": 5}"#).unwrap();
        assert_eq!(tuning.spawn_window_ms, 900);
        assert_eq!(tuning.combo_threshold, 5);
        assert_eq!(tuning.combo_decay_ms, 2500);
        assert_eq!(tuning.reaction_bands.len(), 3);
    }

    #[test]
    fn test_rejects_unsorted_bands() {
        let json = r#"{"reaction_bands": [
            {"max_ms": 1000, "points": 2},
            {"max_ms": 600, "points": 3}
        ]}"#;
        assert!(matches!(
            Tuning::from_json(json),
            Err(TuningError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let path = env::temp_dir().join("sword_reflex_no_such_tuning.json");
        assert!(matches!(Tuning::load(&path), Err(TuningError::Read { .. })));
    }
}
