//! Event dispatch
//!
//! Single entry point that advances the game to `now`: fires expired timers
//! in deadline order, then applies the player's input.

use super::combo::break_combo;
use super::session::{pause, resume};
use super::shop::{purchase, reset_progress};
use super::spawn::{on_interaction, on_timeout, spawn};
use super::state::GameState;

/// Input gathered since the last tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player touched the target
    pub interact: bool,
    /// A panel (shop, inventory, menu) opened
    pub open_panel: bool,
    /// The panel closed
    pub close_panel: bool,
    /// Reset progress requested from the menu
    pub reset: bool,
    /// Buy this tier
    pub purchase: Option<u32>,
}

/// Timer slots, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Task {
    ComboDecay,
    SpawnTimeout,
    Respawn,
}

/// Advance the game state to `now` (ms)
pub fn tick(state: &mut GameState, input: &TickInput, now: u64) {
    // Time never runs backwards
    let now = now.max(state.time_ms);

    // Input at `now` beats timers that expire exactly at `now`
    run_due_tasks(state, now, false);

    if input.open_panel {
        pause(state, now);
    }
    if input.close_panel {
        resume(state, now);
    }
    if input.reset {
        reset_progress(state);
    }
    if let Some(tier) = input.purchase {
        if let Err(err) = purchase(state, tier) {
            log::debug!("Purchase rejected: {}", err);
        }
    }
    if input.interact {
        on_interaction(state, now);
    }

    run_due_tasks(state, now, true);
    state.time_ms = now;
}

fn next_due(state: &GameState, now: u64, inclusive: bool) -> Option<(u64, Task)> {
    [
        (Task::ComboDecay, state.combo.decay()),
        (Task::SpawnTimeout, &state.spawn_timeout),
        (Task::Respawn, &state.respawn),
    ]
    .into_iter()
    .filter(|(_, slot)| slot.is_due(now, inclusive))
    .filter_map(|(task, slot)| slot.deadline().map(|d| (d, task)))
    .min()
}

/// Fire every due task, each at its own deadline, earliest first
fn run_due_tasks(state: &mut GameState, now: u64, inclusive: bool) {
    while let Some((deadline, task)) = next_due(state, now, inclusive) {
        match task {
            Task::ComboDecay => {
                state.combo.decay_mut().cancel();
                break_combo(state);
            }
            Task::SpawnTimeout => {
                state.spawn_timeout.cancel();
                on_timeout(state, deadline);
            }
            Task::Respawn => {
                state.respawn.cancel();
                spawn(state, deadline);
            }
        }
    }
}
