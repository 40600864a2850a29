//! Enchanting service tiers: level gates, costs, rarity pools, line counts.

use super::stats::RarityTier;
use crate::constants::{ARCANE_RUNE_ID, DRAGON_SCALE_ID, MAGIC_ESSENCE_ID};
use serde::{Deserialize, Serialize};

/// Service level selected when starting an enchant session. Not to be
/// confused with [`RarityTier`], the quality grade of a rolled line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnchantTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Gold plus up to three named resources, deducted atomically with the roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnchantCost {
    pub gold: u64,
    pub resources: &'static [(&'static str, u32)],
}

impl EnchantTier {
    pub const ALL: [EnchantTier; 5] = [
        EnchantTier::Common,
        EnchantTier::Uncommon,
        EnchantTier::Rare,
        EnchantTier::Epic,
        EnchantTier::Legendary,
    ];

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            EnchantTier::Common => "Common Enchant",
            EnchantTier::Uncommon => "Uncommon Enchant",
            EnchantTier::Rare => "Rare Enchant",
            EnchantTier::Epic => "Epic Enchant",
            EnchantTier::Legendary => "Legendary Enchant",
        }
    }

    /// Minimum enchanting skill level to buy this service.
    pub fn level_requirement(&self) -> u32 {
        match self {
            EnchantTier::Common => 1,
            EnchantTier::Uncommon => 10,
            EnchantTier::Rare => 25,
            EnchantTier::Epic => 40,
            EnchantTier::Legendary => 55,
        }
    }

    pub fn cost(&self) -> EnchantCost {
        match self {
            EnchantTier::Common => EnchantCost {
                gold: 50,
                resources: &[(MAGIC_ESSENCE_ID, 1)],
            },
            EnchantTier::Uncommon => EnchantCost {
                gold: 200,
                resources: &[(MAGIC_ESSENCE_ID, 3)],
            },
            EnchantTier::Rare => EnchantCost {
                gold: 1_000,
                resources: &[(MAGIC_ESSENCE_ID, 10), (ARCANE_RUNE_ID, 1)],
            },
            EnchantTier::Epic => EnchantCost {
                gold: 5_000,
                resources: &[(MAGIC_ESSENCE_ID, 25), (ARCANE_RUNE_ID, 5)],
            },
            EnchantTier::Legendary => EnchantCost {
                gold: 20_000,
                resources: &[
                    (MAGIC_ESSENCE_ID, 60),
                    (ARCANE_RUNE_ID, 20),
                    (DRAGON_SCALE_ID, 1),
                ],
            },
        }
    }

    pub fn xp_reward(&self) -> u64 {
        match self {
            EnchantTier::Common => 10,
            EnchantTier::Uncommon => 25,
            EnchantTier::Rare => 60,
            EnchantTier::Epic => 150,
            EnchantTier::Legendary => 400,
        }
    }

    /// Rarity grades a session at this tier can roll.
    pub fn possible_rarities(&self) -> &'static [RarityTier] {
        match self {
            EnchantTier::Common => &[RarityTier::Common],
            EnchantTier::Uncommon => &[RarityTier::Common, RarityTier::Uncommon],
            EnchantTier::Rare => &[RarityTier::Common, RarityTier::Uncommon, RarityTier::Rare],
            EnchantTier::Epic => &[RarityTier::Uncommon, RarityTier::Rare, RarityTier::Epic],
            EnchantTier::Legendary => &[RarityTier::Rare, RarityTier::Epic, RarityTier::Legendary],
        }
    }

    /// Upper bound on stat lines rolled per session; the actual count is
    /// uniform in `1..=max_lines`.
    pub fn max_lines(&self) -> u32 {
        match self {
            EnchantTier::Common | EnchantTier::Uncommon => 2,
            EnchantTier::Rare | EnchantTier::Epic => 3,
            EnchantTier::Legendary => 4,
        }
    }
}
