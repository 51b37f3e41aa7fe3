//! Pause/resume gate
//!
//! Opening a panel pauses the loop: the target is hidden, pending spawn
//! timers are dropped and the combo window is frozen. Score and combo
//! survive untouched.

use super::spawn::{hide_target, spawn};
use super::state::GameState;

pub fn pause(state: &mut GameState, now: u64) {
    if state.session_active {
        log::debug!("Session paused");
    }
    state.session_active = false;
    state.spawn_timeout.cancel();
    state.respawn.cancel();
    state.combo.decay_mut().suspend(now);
    hide_target(state);
}

/// Resume and spawn a fresh target. No-op if already running.
pub fn resume(state: &mut GameState, now: u64) {
    if state.session_active {
        return;
    }
    log::debug!("Session resumed");
    state.session_active = true;
    state.combo.decay_mut().resume(now);
    spawn(state, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::persistence::Profile;
    use crate::sim::combo::register_hit;
    use crate::sim::events::GameEvent;
    use crate::tuning::Tuning;

    fn new_state() -> GameState {
        GameState::new(Profile::default(), Catalog::default(), Tuning::default(), 5)
    }

    #[test]
    fn test_pause_hides_and_cancels() {
        let mut state = new_state();
        spawn(&mut state, 0);
        pause(&mut state, 500);
        assert!(!state.session_active);
        assert!(!state.target.visible);
        assert!(state.spawn_timeout.is_idle());
        assert_eq!(state.events().last(), Some(&GameEvent::HideTarget));
    }

    #[test]
    fn test_resume_spawns_fresh_target() {
        let mut state = new_state();
        spawn(&mut state, 0);
        pause(&mut state, 500);
        resume(&mut state, 60_000);
        assert!(state.session_active);
        assert!(state.target.visible);
        assert_eq!(state.target.spawned_at, 60_000);
        assert_eq!(state.spawn_timeout.deadline(), Some(61_500));
    }

    #[test]
    fn test_resume_when_active_is_noop() {
        let mut state = new_state();
        spawn(&mut state, 0);
        state.drain_events();
        resume(&mut state, 100);
        assert_eq!(state.target.spawned_at, 0);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_pause_freezes_combo_window() {
        let mut state = new_state();
        for t in [0, 100, 200] {
            register_hit(&mut state, t);
        }
        // Window ends at 2700; pause with 2000 ms left
        pause(&mut state, 700);
        resume(&mut state, 50_000);
        assert!(state.combo.is_active());
        assert_eq!(state.combo.decay().deadline(), Some(52_000));
    }
}
