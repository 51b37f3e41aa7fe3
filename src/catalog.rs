//! Sword upgrade catalog
//!
//! Tiers are bought strictly in order; owning tier `k` means owning every
//! tier below it, so the equipment bonus is a prefix sum over the catalog.

use serde::{Deserialize, Serialize};

/// A single purchasable upgrade tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeTier {
    /// Display name
    pub name: String,
    /// Points added to every hit once owned
    pub bonus: i64,
    /// Price in coins
    pub cost: i64,
    /// CSS color used by the shop and notifications
    pub color: String,
}

impl UpgradeTier {
    pub fn new(name: &str, bonus: i64, cost: i64, color: &str) -> Self {
        Self {
            name: name.to_string(),
            bonus,
            cost,
            color: color.to_string(),
        }
    }
}

/// Ordered upgrade catalog. Order defines the purchase chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    tiers: Vec<UpgradeTier>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            UpgradeTier::new("Wooden Sword", 1, 20, "#8fd18f"),
            UpgradeTier::new("Stone Sword", 1, 60, "#aaa"),
            UpgradeTier::new("Iron Sword", 2, 150, "#c0c0c0"),
            UpgradeTier::new("Golden Sword", 3, 400, "gold"),
            UpgradeTier::new("Crystal Sword", 1, 800, "cyan"),
            UpgradeTier::new("Legendary Sword", 3, 2000, "orange"),
        ])
    }
}

impl Catalog {
    pub fn new(tiers: Vec<UpgradeTier>) -> Self {
        Self { tiers }
    }

    /// Number of tiers
    pub fn len(&self) -> u32 {
        self.tiers.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Look up a tier by its 1-based level
    pub fn tier(&self, level: u32) -> Option<&UpgradeTier> {
        if level == 0 {
            return None;
        }
        self.tiers.get(level as usize - 1)
    }

    /// Iterate `(level, tier)` pairs, levels starting at 1
    pub fn iter(&self) -> impl Iterator<Item = (u32, &UpgradeTier)> {
        self.tiers
            .iter()
            .enumerate()
            .map(|(i, tier)| (i as u32 + 1, tier))
    }

    /// Sum of bonuses for levels `1..=level`. Levels past the end are capped.
    pub fn cumulative_bonus(&self, level: u32) -> i64 {
        self.tiers
            .iter()
            .take(level as usize)
            .map(|t| t.bonus)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumulative_bonus() {
        let catalog = Catalog::default();
        assert_eq!(catalog.cumulative_bonus(0), 0);
        assert_eq!(catalog.cumulative_bonus(1), 1);
        assert_eq!(catalog.cumulative_bonus(3), 4);
        assert_eq!(catalog.cumulative_bonus(6), 11);
        // Past the end is the full sum
        assert_eq!(catalog.cumulative_bonus(42), 11);
    }

    #[test]
    fn test_tier_lookup_is_one_based() {
        let catalog = Catalog::default();
        assert!(catalog.tier(0).is_none());
        assert_eq!(catalog.tier(1).map(|t| t.cost), Some(20));
        assert_eq!(catalog.tier(6).map(|t| t.name.as_str()), Some("Legendary Sword"));
        assert!(catalog.tier(7).is_none());
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"[
            {"name": "Twig", "bonus": 5, "cost": 1, "color": "brown"},
            {"name": "Branch", "bonus": 7, "cost": 2, "color": "green"}
        ]"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.cumulative_bonus(2), 12);
    }
}
