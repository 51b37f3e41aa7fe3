//! Combo streak
//!
//! Idle -> Building (1..threshold-1 hits) -> Active (multiplier engaged).
//! Every successful hit slides the decay window; if it runs out, or any
//! penalty lands, the streak breaks.

use super::events::{GameEvent, Notice};
use super::state::GameState;
use super::timer::ScheduledTask;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboPhase {
    Idle,
    Building,
    Active,
}

/// Consecutive-hit tracker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Combo {
    hits: u32,
    active: bool,
    decay: ScheduledTask,
}

impl Combo {
    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> ComboPhase {
        if self.active {
            ComboPhase::Active
        } else if self.hits > 0 {
            ComboPhase::Building
        } else {
            ComboPhase::Idle
        }
    }

    /// The inactivity window
    pub fn decay(&self) -> &ScheduledTask {
        &self.decay
    }

    pub fn decay_mut(&mut self) -> &mut ScheduledTask {
        &mut self.decay
    }

    /// Count a hit and slide the decay window. Returns true on activation.
    pub fn register(&mut self, now: u64, tuning: &Tuning) -> bool {
        self.hits = self.hits.saturating_add(1);
        let activated = !self.active && self.hits >= tuning.combo_threshold;
        if activated {
            self.active = true;
        }
        self.decay.arm(now, tuning.combo_decay_ms);
        activated
    }

    /// Drop the streak. Returns true if a combo was active.
    pub fn reset(&mut self) -> bool {
        let was_active = self.active;
        self.hits = 0;
        self.active = false;
        self.decay.cancel();
        was_active
    }
}

/// Register a successful hit, announcing activation
pub fn register_hit(state: &mut GameState, now: u64) {
    if state.combo.register(now, &state.tuning) {
        log::debug!("Combo activated after {} hits", state.combo.hits());
        let multiplier = state.tuning.combo_multiplier;
        state.notify(Notice::ComboActivated { multiplier });
        state.emit(GameEvent::ComboFlash { on: true });
    }
}

/// Break the streak. Only announces when a combo was actually active.
pub fn break_combo(state: &mut GameState) {
    let was_active = state.combo.reset();
    if was_active {
        log::debug!("Combo lost");
        state.notify(Notice::ComboLost);
        state.emit(GameEvent::ComboFlash { on: false });
    }
}
