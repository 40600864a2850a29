//! Stat pool configuration: applicability, structure gates, and per-rarity
//! value ranges with roll weights.
//!
//! Every entry is static data; the roller resolves applicability against the
//! built-structures registry fresh on each call.

use crate::equipment::EquipmentSlot;
use crate::structures::StructureId;
use serde::{Deserialize, Serialize};

/// Quality grade of a single rolled stat line, distinct from the enchanting
/// service tier used to start a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RarityTier {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl RarityTier {
    pub const ALL: [RarityTier; 5] = [
        RarityTier::Common,
        RarityTier::Uncommon,
        RarityTier::Rare,
        RarityTier::Epic,
        RarityTier::Legendary,
    ];

    /// Display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Uncommon => "Uncommon",
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
            RarityTier::Legendary => "Legendary",
        }
    }
}

/// Value range and roll weight for one stat at one rarity tier.
/// A zero weight means the tier exists in data but can never be rolled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProfile {
    pub min: f64,
    pub max: f64,
    pub weight: f64,
}

/// Which equipment slots a stat can roll on.
#[derive(Debug, Clone, Copy)]
pub enum Applicability {
    AllGear,
    Slots(&'static [EquipmentSlot]),
}

impl Applicability {
    pub fn includes(&self, slot: EquipmentSlot) -> bool {
        match self {
            Applicability::AllGear => true,
            Applicability::Slots(slots) => slots.contains(&slot),
        }
    }
}

const WEAPON_ONLY: &[EquipmentSlot] = &[EquipmentSlot::Weapon];
const TOOLS: &[EquipmentSlot] = &[EquipmentSlot::Axe, EquipmentSlot::Pickaxe];
const BODY: &[EquipmentSlot] = &[EquipmentSlot::Armor, EquipmentSlot::Helmet];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    DamageFlat,
    DamagePercent,
    CritChance,
    CritDamage,
    LifeSteal,
    FireDamage,
    IceDamage,
    ArmorFlat,
    HpFlat,
    HpRegen,
    GatheringSpeed,
    GatheringDoubleChance,
    GatheringQuadChance,
    XpGain,
    GoldFind,
}

impl StatType {
    pub const ALL: [StatType; 15] = [
        StatType::DamageFlat,
        StatType::DamagePercent,
        StatType::CritChance,
        StatType::CritDamage,
        StatType::LifeSteal,
        StatType::FireDamage,
        StatType::IceDamage,
        StatType::ArmorFlat,
        StatType::HpFlat,
        StatType::HpRegen,
        StatType::GatheringSpeed,
        StatType::GatheringDoubleChance,
        StatType::GatheringQuadChance,
        StatType::XpGain,
        StatType::GoldFind,
    ];

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            StatType::DamageFlat => "Damage",
            StatType::DamagePercent => "Damage %",
            StatType::CritChance => "Crit Chance",
            StatType::CritDamage => "Crit Damage",
            StatType::LifeSteal => "Life Steal",
            StatType::FireDamage => "Fire Damage",
            StatType::IceDamage => "Ice Damage",
            StatType::ArmorFlat => "Armor",
            StatType::HpFlat => "Health",
            StatType::HpRegen => "Health Regen",
            StatType::GatheringSpeed => "Gathering Speed",
            StatType::GatheringDoubleChance => "Double Gather Chance",
            StatType::GatheringQuadChance => "Quadruple Gather Chance",
            StatType::XpGain => "XP Gain",
            StatType::GoldFind => "Gold Find",
        }
    }

    pub fn applicability(&self) -> Applicability {
        match self {
            StatType::DamageFlat
            | StatType::DamagePercent
            | StatType::CritChance
            | StatType::CritDamage
            | StatType::LifeSteal
            | StatType::FireDamage
            | StatType::IceDamage => Applicability::Slots(WEAPON_ONLY),
            StatType::ArmorFlat | StatType::HpFlat | StatType::HpRegen => {
                Applicability::Slots(BODY)
            }
            StatType::GatheringSpeed
            | StatType::GatheringDoubleChance
            | StatType::GatheringQuadChance => Applicability::Slots(TOOLS),
            StatType::XpGain | StatType::GoldFind => Applicability::AllGear,
        }
    }

    /// Structure that must be built before this stat enters the roll pool.
    pub fn required_structure(&self) -> Option<StructureId> {
        match self {
            StatType::LifeSteal | StatType::FireDamage | StatType::IceDamage => {
                Some(StructureId::WizardTower)
            }
            StatType::GatheringQuadChance => Some(StructureId::Sawmill),
            _ => None,
        }
    }

    /// Wizard stats are capped at one concurrent line per item.
    pub fn is_wizard_exclusive(&self) -> bool {
        matches!(
            self,
            StatType::LifeSteal | StatType::FireDamage | StatType::IceDamage
        )
    }

    /// Whether the stat's value is a fraction shown as a percentage.
    pub fn is_percentage(&self) -> bool {
        !matches!(
            self,
            StatType::DamageFlat
                | StatType::FireDamage
                | StatType::IceDamage
                | StatType::ArmorFlat
                | StatType::HpFlat
                | StatType::HpRegen
        )
    }

    /// Value range and weight for this stat at the given rarity, or `None`
    /// where the stat simply has no entry at that rarity.
    pub fn tier_profile(&self, tier: RarityTier) -> Option<TierProfile> {
        use RarityTier::*;
        match self {
            StatType::DamageFlat => Some(match tier {
                Common => p(1.0, 3.0, 100.0),
                Uncommon => p(2.0, 6.0, 60.0),
                Rare => p(5.0, 12.0, 30.0),
                Epic => p(10.0, 25.0, 10.0),
                Legendary => p(20.0, 50.0, 3.0),
            }),
            StatType::DamagePercent => match tier {
                Common => None,
                Uncommon => Some(p(0.02, 0.05, 50.0)),
                Rare => Some(p(0.04, 0.10, 25.0)),
                Epic => Some(p(0.08, 0.18, 8.0)),
                Legendary => Some(p(0.15, 0.35, 2.0)),
            },
            StatType::CritChance => Some(match tier {
                Common => p(0.005, 0.01, 80.0),
                Uncommon => p(0.01, 0.02, 50.0),
                Rare => p(0.02, 0.04, 25.0),
                Epic => p(0.03, 0.06, 8.0),
                Legendary => p(0.05, 0.10, 2.0),
            }),
            StatType::CritDamage => match tier {
                Common | Uncommon => None,
                Rare => Some(p(0.10, 0.20, 30.0)),
                Epic => Some(p(0.15, 0.35, 10.0)),
                Legendary => Some(p(0.30, 0.60, 3.0)),
            },
            StatType::LifeSteal => match tier {
                Common => None,
                Uncommon => Some(p(0.01, 0.02, 40.0)),
                Rare => Some(p(0.02, 0.04, 20.0)),
                Epic => Some(p(0.03, 0.06, 6.0)),
                Legendary => Some(p(0.05, 0.12, 2.0)),
            },
            StatType::FireDamage => Some(match tier {
                Common => p(2.0, 5.0, 100.0),
                Uncommon => p(4.0, 10.0, 60.0),
                Rare => p(8.0, 20.0, 30.0),
                Epic => p(16.0, 40.0, 10.0),
                Legendary => p(30.0, 80.0, 3.0),
            }),
            StatType::IceDamage => Some(match tier {
                Common => p(1.0, 4.0, 100.0),
                Uncommon => p(3.0, 8.0, 60.0),
                Rare => p(6.0, 16.0, 30.0),
                Epic => p(12.0, 32.0, 10.0),
                Legendary => p(25.0, 65.0, 3.0),
            }),
            StatType::ArmorFlat => Some(match tier {
                Common => p(1.0, 3.0, 100.0),
                Uncommon => p(2.0, 6.0, 60.0),
                Rare => p(4.0, 10.0, 30.0),
                Epic => p(8.0, 20.0, 10.0),
                Legendary => p(15.0, 40.0, 3.0),
            }),
            StatType::HpFlat => Some(match tier {
                Common => p(5.0, 15.0, 100.0),
                Uncommon => p(10.0, 30.0, 60.0),
                Rare => p(25.0, 60.0, 30.0),
                Epic => p(50.0, 120.0, 10.0),
                Legendary => p(100.0, 250.0, 3.0),
            }),
            StatType::HpRegen => match tier {
                Common => None,
                Uncommon => Some(p(0.5, 1.0, 50.0)),
                Rare => Some(p(1.0, 2.5, 25.0)),
                Epic => Some(p(2.0, 5.0, 8.0)),
                Legendary => Some(p(4.0, 10.0, 2.0)),
            },
            StatType::GatheringSpeed => Some(match tier {
                Common => p(0.01, 0.03, 100.0),
                Uncommon => p(0.02, 0.06, 60.0),
                Rare => p(0.05, 0.10, 30.0),
                Epic => p(0.08, 0.18, 10.0),
                Legendary => p(0.15, 0.30, 3.0),
            }),
            StatType::GatheringDoubleChance => Some(match tier {
                Common => p(0.01, 0.02, 80.0),
                Uncommon => p(0.02, 0.04, 50.0),
                Rare => p(0.03, 0.07, 25.0),
                Epic => p(0.06, 0.12, 8.0),
                Legendary => p(0.10, 0.20, 2.0),
            }),
            // The common entry is a placeholder row in the data table; its
            // zero weight keeps it out of every roll.
            StatType::GatheringQuadChance => Some(match tier {
                Common => p(0.0, 0.0, 0.0),
                Uncommon => p(0.005, 0.01, 40.0),
                Rare => p(0.01, 0.02, 20.0),
                Epic => p(0.02, 0.04, 6.0),
                Legendary => p(0.03, 0.08, 2.0),
            }),
            StatType::XpGain => Some(match tier {
                Common => p(0.01, 0.02, 90.0),
                Uncommon => p(0.02, 0.04, 55.0),
                Rare => p(0.03, 0.07, 28.0),
                Epic => p(0.06, 0.12, 9.0),
                Legendary => p(0.10, 0.25, 3.0),
            }),
            StatType::GoldFind => Some(match tier {
                Common => p(0.01, 0.03, 90.0),
                Uncommon => p(0.02, 0.06, 55.0),
                Rare => p(0.05, 0.10, 28.0),
                Epic => p(0.08, 0.18, 9.0),
                Legendary => p(0.15, 0.35, 3.0),
            }),
        }
    }
}

const fn p(min: f64, max: f64, weight: f64) -> TierProfile {
    TierProfile { min, max, weight }
}
