//! Target lifecycle
//!
//! Hidden -> Visible (timeout armed) -> hit or timeout -> Hidden -> respawn.
//! Every path out of Visible cancels the pending timeout.

use glam::Vec2;
use rand::Rng;

use super::events::{GameEvent, Notice};
use super::scoring::{apply_hit, reaction_points};
use super::state::GameState;
use crate::tuning::Extent;

/// Uniform random top-left corner keeping the whole target inside `area`.
/// An area smaller than the target pins that axis to 0.
pub fn placement<R: Rng>(rng: &mut R, area: Extent, target: Extent) -> Vec2 {
    let max_x = (area.width - target.width).max(0.0);
    let max_y = (area.height - target.height).max(0.0);
    Vec2::new(rng.random::<f32>() * max_x, rng.random::<f32>() * max_y)
}

/// Show a new target. No-op while the session is paused.
pub fn spawn(state: &mut GameState, now: u64) {
    if !state.session_active {
        return;
    }
    state.spawn_timeout.cancel();
    state.respawn.cancel();

    let pos = placement(&mut state.rng, state.area, state.tuning.target);
    state.target.visible = true;
    state.target.spawned_at = now;
    state.target.pos = pos;
    state.emit(GameEvent::ShowTarget { pos });

    // A zero window would expire in the same tick it was armed, forever
    state.spawn_timeout.arm(now, state.tuning.spawn_window_ms.max(1));
}

pub fn hide_target(state: &mut GameState) {
    state.target.visible = false;
    state.emit(GameEvent::HideTarget);
}

/// The spawn window ran out
pub fn on_timeout(state: &mut GameState, now: u64) {
    if !state.session_active {
        return;
    }
    state.spawn_timeout.cancel();
    hide_target(state);
    let penalty = state.tuning.timeout_points;
    apply_hit(state, penalty, now);
    state.notify(Notice::TooSlow);
    spawn(state, now);
}

/// The player touched the target. Returns the score delta if the touch counted.
pub fn on_interaction(state: &mut GameState, now: u64) -> Option<i64> {
    if !state.session_active || !state.target.visible {
        return None;
    }
    let reaction = now.saturating_sub(state.target.spawned_at);
    state.spawn_timeout.cancel();
    hide_target(state);

    let base = reaction_points(&state.tuning, reaction);
    log::debug!("Reaction {} ms -> {} points", reaction, base);
    let delta = apply_hit(state, base, now);

    state.respawn.arm(now, state.tuning.respawn_delay_ms);
    Some(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::persistence::Profile;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn new_state() -> GameState {
        GameState::new(Profile::default(), Catalog::default(), Tuning::default(), 42)
    }

    #[test]
    fn test_placement_stays_inside_area() {
        let mut rng = Pcg32::seed_from_u64(9);
        let area = Extent::new(300.0, 200.0);
        let target = Extent::new(60.0, 60.0);
        for _ in 0..1000 {
            let pos = placement(&mut rng, area, target);
            assert!(pos.x >= 0.0 && pos.x + target.width <= area.width);
            assert!(pos.y >= 0.0 && pos.y + target.height <= area.height);
        }
    }

    #[test]
    fn test_placement_degenerate_area_pins_to_origin() {
        let mut rng = Pcg32::seed_from_u64(9);
        let pos = placement(&mut rng, Extent::new(40.0, 10.0), Extent::new(60.0, 60.0));
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn test_spawn_arms_timeout() {
        let mut state = new_state();
        spawn(&mut state, 100);
        assert!(state.target.visible);
        assert_eq!(state.target.spawned_at, 100);
        assert_eq!(state.spawn_timeout.deadline(), Some(1600));
        assert!(matches!(state.events()[0], GameEvent::ShowTarget { .. }));
    }

    #[test]
    fn test_zero_window_still_advances_time() {
        let mut state = GameState::new(
            Profile::default(),
            Catalog::default(),
            Tuning {
                spawn_window_ms: 0,
                ..Default::default()
            },
            42,
        );
        spawn(&mut state, 10);
        assert_eq!(state.spawn_timeout.deadline(), Some(11));
    }

    #[test]
    fn test_spawn_noop_when_paused() {
        let mut state = new_state();
        state.session_active = false;
        spawn(&mut state, 0);
        assert!(!state.target.visible);
        assert!(state.spawn_timeout.is_idle());
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_interaction_scores_and_schedules_respawn() {
        let mut state = new_state();
        spawn(&mut state, 1000);
        assert_eq!(on_interaction(&mut state, 1550), Some(3));
        assert!(!state.target.visible);
        assert!(state.spawn_timeout.is_idle());
        assert_eq!(state.respawn.deadline(), Some(1670));
        assert_eq!(state.combo.hits(), 1);
    }

    #[test]
    fn test_interaction_ignored_when_hidden() {
        let mut state = new_state();
        assert_eq!(on_interaction(&mut state, 10), None);
        spawn(&mut state, 0);
        on_interaction(&mut state, 10);
        // Second touch lands on an already hidden target
        assert_eq!(on_interaction(&mut state, 20), None);
        assert_eq!(state.score(), 3);
    }

    #[test]
    fn test_timeout_penalizes_and_respawns_immediately() {
        let mut state = new_state();
        spawn(&mut state, 0);
        on_timeout(&mut state, 1500);
        assert_eq!(state.score(), -2);
        assert!(state.target.visible);
        assert_eq!(state.target.spawned_at, 1500);
        assert_eq!(state.spawn_timeout.deadline(), Some(3000));
        assert!(state.events().contains(&GameEvent::Notify(Notice::TooSlow)));
    }
}
