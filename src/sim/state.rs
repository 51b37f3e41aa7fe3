//! Game state and core simulation types
//!
//! `GameState` is the single aggregate every operation works on. Profile
//! scalars are private so the derived equipment bonus can't drift from the
//! equipped tier.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::combo::Combo;
use super::events::{GameEvent, Notice};
use super::timer::ScheduledTask;
use crate::catalog::Catalog;
use crate::persistence::Profile;
use crate::tuning::{Extent, Tuning};

/// The clickable target
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Target {
    pub visible: bool,
    /// When the target last appeared (ms)
    pub spawned_at: u64,
    /// Top-left corner inside the play area
    pub pos: Vec2,
}

impl Target {
    pub fn center(&self, size: Extent) -> Vec2 {
        self.pos + Vec2::new(size.width, size.height) / 2.0
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Upgrade tiers on sale
    pub catalog: Catalog,
    /// Balance values and timer durations
    pub tuning: Tuning,
    /// Combo streak and its decay window
    pub combo: Combo,
    pub target: Target,
    /// False while a panel is open
    pub session_active: bool,
    /// Current play-area bounds
    pub area: Extent,
    /// Target expiry
    pub spawn_timeout: ScheduledTask,
    /// Delay between a hit and the next spawn
    pub respawn: ScheduledTask,
    /// Timestamp of the last processed tick (ms)
    pub time_ms: u64,
    pub(crate) rng: Pcg32,
    profile: Profile,
    equipment_bonus: i64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state from a loaded profile
    pub fn new(profile: Profile, catalog: Catalog, tuning: Tuning, seed: u64) -> Self {
        let profile = profile.sanitized(catalog.len());
        let equipment_bonus = catalog.cumulative_bonus(profile.equipped_tier);
        Self {
            area: tuning.area,
            catalog,
            tuning,
            combo: Combo::default(),
            target: Target::default(),
            session_active: true,
            spawn_timeout: ScheduledTask::default(),
            respawn: ScheduledTask::default(),
            time_ms: 0,
            rng: Pcg32::seed_from_u64(seed),
            profile,
            equipment_bonus,
            events: Vec::new(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn score(&self) -> i64 {
        self.profile.score
    }

    pub fn record(&self) -> i64 {
        self.profile.record
    }

    pub fn equipped_tier(&self) -> u32 {
        self.profile.equipped_tier
    }

    /// Sum of bonuses of every owned tier
    pub fn equipment_bonus(&self) -> i64 {
        self.equipment_bonus
    }

    /// Add `delta` to the score. Returns true if this set a new record.
    pub fn add_score(&mut self, delta: i64) -> bool {
        self.profile.score += delta;
        if self.profile.score > self.profile.record {
            self.profile.record = self.profile.score;
            return true;
        }
        false
    }

    /// Pay for an upgrade. Never touches the record.
    pub(crate) fn spend(&mut self, cost: i64) {
        self.profile.score -= cost;
    }

    pub(crate) fn set_equipped_tier(&mut self, tier: u32) {
        self.profile.equipped_tier = tier.min(self.catalog.len());
        self.equipment_bonus = self.catalog.cumulative_bonus(self.profile.equipped_tier);
    }

    /// Zero the score and equipment, keeping the record
    pub(crate) fn clear_progress(&mut self) {
        self.profile.reset();
        self.equipment_bonus = 0;
    }

    /// Whether the next tier exists and the balance covers it
    pub fn next_tier_affordable(&self) -> bool {
        self.catalog
            .tier(self.profile.equipped_tier + 1)
            .is_some_and(|t| self.profile.score >= t.cost)
    }

    pub fn target_center(&self) -> Vec2 {
        self.target.center(self.tuning.target)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn notify(&mut self, notice: Notice) {
        self.events.push(GameEvent::Notify(notice));
    }

    /// Queue a redraw of the scoreboard, shop and inventory
    pub fn emit_progress(&mut self) {
        let equipped = self.profile.equipped_tier;
        self.emit(GameEvent::Scoreboard {
            score: self.profile.score,
            record: self.profile.record,
        });
        self.emit(GameEvent::Catalog {
            equipped_tier: equipped,
            next_affordable: self.next_tier_affordable(),
        });
        self.emit(GameEvent::OwnedEquipment {
            tier: (equipped > 0).then_some(equipped),
        });
    }

    /// Pending events, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
