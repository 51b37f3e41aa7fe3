//! Game controller
//!
//! Owns the simulation state, the storage gateway and the player's settings.
//! Front ends feed it input and timestamps and render the events it returns.

use crate::catalog::Catalog;
use crate::persistence::{Gateway, KeyValueStore, Profile, StoreError};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, ShopItem, TickInput};
use crate::tuning::{Extent, Tuning};

pub struct Game<S: KeyValueStore> {
    state: GameState,
    gateway: Gateway<S>,
    settings: Settings,
    /// Last profile successfully written
    saved: Profile,
}

impl<S: KeyValueStore> Game<S> {
    /// Load settings and profile (migrating old saves) from `store`.
    /// Invalid tuning is replaced by the defaults.
    pub fn new(store: S, catalog: Catalog, tuning: Tuning, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(err) => {
                log::warn!("Rejected tuning ({}), using defaults", err);
                Tuning::default()
            }
        };
        let mut gateway = Gateway::new(store);
        let settings = Settings::load(&gateway);
        let profile = Profile::load(&mut gateway, catalog.len());
        let state = GameState::new(profile, catalog, tuning, seed);
        let saved = *state.profile();
        Self {
            state,
            gateway,
            settings,
            saved,
        }
    }

    /// Draw the initial scoreboard and show the first target
    pub fn start(&mut self, now: u64) -> Vec<GameEvent> {
        log::info!(
            "Game started (score {}, record {}, tier {})",
            self.state.score(),
            self.state.record(),
            self.state.equipped_tier()
        );
        self.state.time_ms = now;
        self.state.emit_progress();
        sim::spawn(&mut self.state, now);
        self.state.drain_events()
    }

    /// Advance to `now`, apply `input`, persist, and hand back the effects
    pub fn tick(&mut self, input: &TickInput, now: u64) -> Vec<GameEvent> {
        sim::tick(&mut self.state, input, now);
        self.persist(input.reset);
        self.state.drain_events()
    }

    pub fn on_interaction(&mut self, now: u64) -> Vec<GameEvent> {
        self.tick(
            &TickInput {
                interact: true,
                ..Default::default()
            },
            now,
        )
    }

    pub fn on_panel_open(&mut self, now: u64) -> Vec<GameEvent> {
        self.tick(
            &TickInput {
                open_panel: true,
                ..Default::default()
            },
            now,
        )
    }

    pub fn on_panel_close(&mut self, now: u64) -> Vec<GameEvent> {
        self.tick(
            &TickInput {
                close_panel: true,
                ..Default::default()
            },
            now,
        )
    }

    pub fn on_reset_requested(&mut self, now: u64) -> Vec<GameEvent> {
        self.tick(
            &TickInput {
                reset: true,
                ..Default::default()
            },
            now,
        )
    }

    pub fn purchase(&mut self, tier: u32, now: u64) -> Vec<GameEvent> {
        self.tick(
            &TickInput {
                purchase: Some(tier),
                ..Default::default()
            },
            now,
        )
    }

    /// Update the play-area bounds used for the next placement
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.area = Extent::new(width, height);
    }

    /// Override the target size when the front end measures it
    pub fn set_target_size(&mut self, width: f32, height: f32) {
        self.state.tuning.target = Extent::new(width, height);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<(), StoreError> {
        self.settings = settings;
        self.settings.save(&mut self.gateway)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.state.catalog
    }

    pub fn shop_view(&self) -> Vec<ShopItem<'_>> {
        sim::shop_view(
            &self.state.catalog,
            self.state.equipped_tier(),
            self.state.score(),
        )
    }

    pub fn store(&self) -> &S {
        self.gateway.store()
    }

    /// Write the profile if it changed. Failures are logged and retried on
    /// the next change; they never interrupt play.
    fn persist(&mut self, reset: bool) {
        if reset {
            if let Err(err) = Profile::clear_legacy(&mut self.gateway) {
                log::warn!("Failed to clear legacy progress: {err}");
            }
        }
        let profile = *self.state.profile();
        if profile == self.saved && !reset {
            return;
        }
        match profile.save(&mut self.gateway) {
            Ok(()) => self.saved = profile,
            Err(err) => log::warn!("Failed to save profile: {err}"),
        }
    }
}
