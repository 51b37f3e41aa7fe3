//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied millisecond timestamps only
//! - Seeded RNG only
//! - Effects go out as queued `GameEvent`s, never direct UI calls

pub mod combo;
pub mod events;
pub mod scoring;
pub mod session;
pub mod shop;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use combo::{Combo, ComboPhase, break_combo, register_hit};
pub use events::{GameEvent, Notice};
pub use scoring::{apply_hit, hit_delta, reaction_points};
pub use session::{pause, resume};
pub use shop::{PurchaseError, ShopItem, ShopStatus, purchase, reset_progress, shop_view};
pub use spawn::{on_interaction, on_timeout, placement, spawn};
pub use state::{GameState, Target};
pub use tick::{TickInput, tick};
pub use timer::ScheduledTask;
