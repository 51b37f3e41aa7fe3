//! Upgrade purchases and progress reset

use thiserror::Error;

use super::combo::break_combo;
use super::events::Notice;
use super::state::GameState;
use crate::catalog::{Catalog, UpgradeTier};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("tier {tier} does not exist")]
    UnknownTier { tier: u32 },
    #[error("tier {requested} is locked, next purchasable tier is {next}")]
    OutOfSequence { requested: u32, next: u32 },
    #[error("tier costs {cost} but balance is {balance}")]
    InsufficientFunds { cost: i64, balance: i64 },
}

/// How a tier appears in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopStatus {
    Owned,
    /// Next in line
    Available { affordable: bool },
    /// An earlier tier is still missing
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem<'a> {
    pub level: u32,
    pub tier: &'a UpgradeTier,
    pub status: ShopStatus,
}

/// Shop listing for the given progress
pub fn shop_view(catalog: &Catalog, equipped: u32, score: i64) -> Vec<ShopItem<'_>> {
    catalog
        .iter()
        .map(|(level, tier)| {
            let status = if level <= equipped {
                ShopStatus::Owned
            } else if level == equipped + 1 {
                ShopStatus::Available {
                    affordable: score >= tier.cost,
                }
            } else {
                ShopStatus::Locked
            };
            ShopItem {
                level,
                tier,
                status,
            }
        })
        .collect()
}

/// Buy `tier`. It must be the next tier in sequence and fully affordable.
pub fn purchase(state: &mut GameState, tier: u32) -> Result<(), PurchaseError> {
    let next = state.equipped_tier() + 1;
    let Some(entry) = state.catalog.tier(tier).cloned() else {
        state.notify(Notice::TierLocked { tier });
        return Err(PurchaseError::UnknownTier { tier });
    };
    if tier != next {
        state.notify(Notice::TierLocked { tier });
        return Err(PurchaseError::OutOfSequence {
            requested: tier,
            next,
        });
    }
    let balance = state.score();
    if balance < entry.cost {
        state.notify(Notice::InsufficientFunds {
            cost: entry.cost,
            balance,
        });
        return Err(PurchaseError::InsufficientFunds {
            cost: entry.cost,
            balance,
        });
    }

    state.spend(entry.cost);
    state.set_equipped_tier(tier);
    log::info!(
        "Bought {} (tier {}), bonus now {}",
        entry.name,
        tier,
        state.equipment_bonus()
    );
    state.emit_progress();
    state.notify(Notice::Purchased {
        tier,
        name: entry.name,
        color: entry.color,
    });
    Ok(())
}

/// Clear score and equipment, keep the record, end any combo
pub fn reset_progress(state: &mut GameState) {
    log::info!("Progress reset (record {} kept)", state.record());
    state.clear_progress();
    break_combo(state);
    state.emit_progress();
    state.notify(Notice::ProgressReset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Profile;
    use crate::sim::combo::register_hit;
    use crate::sim::events::GameEvent;
    use crate::tuning::Tuning;

    fn state_with(score: i64, record: i64, tier: u32) -> GameState {
        GameState::new(
            Profile {
                score,
                record,
                equipped_tier: tier,
            },
            Catalog::default(),
            Tuning::default(),
            11,
        )
    }

    #[test]
    fn test_purchase_without_funds_fails() {
        let mut state = state_with(0, 0, 0);
        assert_eq!(
            purchase(&mut state, 1),
            Err(PurchaseError::InsufficientFunds {
                cost: 20,
                balance: 0
            })
        );
        assert_eq!(state.score(), 0);
        assert_eq!(state.equipped_tier(), 0);
        assert!(state.events().contains(&GameEvent::Notify(Notice::InsufficientFunds {
            cost: 20,
            balance: 0
        })));
    }

    #[test]
    fn test_purchase_sequence() {
        let mut state = state_with(300, 300, 0);
        purchase(&mut state, 1).unwrap();
        purchase(&mut state, 2).unwrap();
        purchase(&mut state, 3).unwrap();
        assert_eq!(state.score(), 300 - 20 - 60 - 150);
        assert_eq!(state.record(), 300);
        assert_eq!(state.equipped_tier(), 3);
        assert_eq!(state.equipment_bonus(), 4);
    }

    #[test]
    fn test_purchase_exact_cost() {
        let mut state = state_with(20, 20, 0);
        purchase(&mut state, 1).unwrap();
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_purchase_out_of_sequence_rejected() {
        let mut state = state_with(10_000, 10_000, 1);
        assert_eq!(
            purchase(&mut state, 3),
            Err(PurchaseError::OutOfSequence {
                requested: 3,
                next: 2
            })
        );
        // Rebuying an owned tier is out of sequence too
        assert!(matches!(
            purchase(&mut state, 1),
            Err(PurchaseError::OutOfSequence { .. })
        ));
        assert_eq!(
            purchase(&mut state, 0),
            Err(PurchaseError::UnknownTier { tier: 0 })
        );
        assert_eq!(
            purchase(&mut state, 7),
            Err(PurchaseError::UnknownTier { tier: 7 })
        );
        assert_eq!(state.score(), 10_000);
        assert_eq!(state.equipped_tier(), 1);
    }

    #[test]
    fn test_reset_keeps_record_and_ends_combo() {
        let mut state = state_with(150, 200, 3);
        for t in [0, 1, 2] {
            register_hit(&mut state, t);
        }
        reset_progress(&mut state);
        assert_eq!(state.score(), 0);
        assert_eq!(state.record(), 200);
        assert_eq!(state.equipped_tier(), 0);
        assert_eq!(state.equipment_bonus(), 0);
        assert!(!state.combo.is_active());
        assert!(state.events().contains(&GameEvent::Notify(Notice::ProgressReset)));
    }

    #[test]
    fn test_shop_view_statuses() {
        let catalog = Catalog::default();
        let view = shop_view(&catalog, 2, 100);
        assert_eq!(view.len(), 6);
        assert_eq!(view[0].status, ShopStatus::Owned);
        assert_eq!(view[1].status, ShopStatus::Owned);
        assert_eq!(view[2].status, ShopStatus::Available { affordable: false });
        assert_eq!(view[3].status, ShopStatus::Locked);

        let view = shop_view(&catalog, 2, 150);
        assert_eq!(view[2].status, ShopStatus::Available { affordable: true });
    }
}
