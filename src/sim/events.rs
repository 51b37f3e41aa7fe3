//! Events emitted by the simulation for the UI
//!
//! The simulation never touches the page. It queues these and the front end
//! drains them after every tick.

use glam::Vec2;
use serde::Serialize;

/// Transient message shown to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Notice {
    /// Score passed the best-ever balance
    NewRecord,
    /// Coins gained; `multiplier` is set when the combo scaled the gain
    Gain { amount: i64, multiplier: Option<i64> },
    /// Coins lost (or a zero-point hit)
    Penalty { amount: i64 },
    ComboActivated { multiplier: i64 },
    ComboLost,
    /// Target expired untouched
    TooSlow,
    Purchased { tier: u32, name: String, color: String },
    InsufficientFunds { cost: i64, balance: i64 },
    /// Tier doesn't exist or an earlier tier is still missing
    TierLocked { tier: u32 },
    /// Score and equipment cleared (record kept)
    ProgressReset,
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Notice::NewRecord => "🏆 New record!".to_string(),
            Notice::Gain {
                amount,
                multiplier: Some(m),
            } => format!("+{amount} coins (x{m})"),
            Notice::Gain { amount, .. } => format!("+{amount} coins"),
            Notice::Penalty { amount } => format!("{amount} coins"),
            Notice::ComboActivated { multiplier } => format!("⚡ Combo x{multiplier} activated!"),
            Notice::ComboLost => "Combo lost 😞".to_string(),
            Notice::TooSlow => "❌ Too slow!".to_string(),
            Notice::Purchased { name, .. } => format!("🗡️ You bought the {name}!"),
            Notice::InsufficientFunds { .. } => "Not enough coins.".to_string(),
            Notice::TierLocked { .. } => "🔒 Unlock the previous sword first.".to_string(),
            Notice::ProgressReset => "Progress reset (record kept)".to_string(),
        }
    }

    /// CSS color hint
    pub fn color(&self) -> &str {
        match self {
            Notice::NewRecord => "gold",
            Notice::Gain {
                multiplier: Some(_),
                ..
            } => "yellow",
            Notice::Gain { .. } => "lime",
            Notice::Penalty { .. } => "red",
            Notice::ComboActivated { .. } => "yellow",
            Notice::ComboLost => "orange",
            Notice::TooSlow => "red",
            Notice::Purchased { color, .. } => color.as_str(),
            Notice::InsufficientFunds { .. } => "red",
            Notice::TierLocked { .. } => "gray",
            Notice::ProgressReset => "orange",
        }
    }
}

/// Effects requested from the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    Notify(Notice),
    Scoreboard { score: i64, record: i64 },
    /// Shop needs redrawing; `next_affordable` is whether the next tier can be bought now
    Catalog { equipped_tier: u32, next_affordable: bool },
    /// Highest owned tier, `None` when the inventory is empty
    OwnedEquipment { tier: Option<u32> },
    /// Show the target with its top-left corner at `pos`
    ShowTarget { pos: Vec2 },
    HideTarget,
    ComboFlash { on: bool },
    Shake,
    Particles { pos: Vec2, color: &'static str },
}
