//! Scoring
//!
//! Reaction time maps to base points, equipment adds a flat bonus, and the
//! combo multiplies positive gains only. Penalties are never multiplied.

use super::combo::{break_combo, register_hit};
use super::events::{GameEvent, Notice};
use super::state::GameState;
use crate::tuning::Tuning;

/// Base points for a hit `reaction_ms` after the target appeared
pub fn reaction_points(tuning: &Tuning, reaction_ms: u64) -> i64 {
    tuning
        .reaction_bands
        .iter()
        .find(|band| reaction_ms <= band.max_ms)
        .map(|band| band.points)
        .unwrap_or(tuning.slow_points)
}

/// Score change for a hit worth `base` points
#[inline]
pub fn hit_delta(base: i64, bonus: i64, combo_active: bool, multiplier: i64) -> i64 {
    if base > 0 && combo_active {
        (base + bonus) * multiplier
    } else {
        base + bonus
    }
}

/// Apply a hit worth `base` points at time `now`. Returns the score delta.
///
/// A positive `base` with a positive delta extends the combo; anything else
/// breaks it.
pub fn apply_hit(state: &mut GameState, base: i64, now: u64) -> i64 {
    let combo_active = state.combo.is_active();
    let multiplier = state.tuning.combo_multiplier;
    let delta = hit_delta(base, state.equipment_bonus(), combo_active, multiplier);
    let multiplied = combo_active && base > 0;

    if state.add_score(delta) {
        log::info!("New record: {}", state.record());
        state.notify(Notice::NewRecord);
    }
    log::debug!(
        "Hit: base {} bonus {} delta {} -> score {}",
        base,
        state.equipment_bonus(),
        delta,
        state.score()
    );
    state.emit_progress();

    if delta > 0 {
        state.notify(Notice::Gain {
            amount: delta,
            multiplier: multiplied.then_some(multiplier),
        });
        let pos = state.target_center();
        let color = if multiplied { "gold" } else { "lime" };
        state.emit(GameEvent::Particles { pos, color });
    } else {
        state.notify(Notice::Penalty { amount: delta });
    }

    if base > 0 && delta > 0 {
        register_hit(state, now);
    } else {
        break_combo(state);
    }

    if delta <= 0 {
        state.emit(GameEvent::Shake);
    }

    delta
}
