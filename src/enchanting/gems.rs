//! Ring gem enchantments and the gem conversion chain.
//!
//! Rings are one-shot: a single gem is consumed, the gem's fixed stat table
//! is sampled without replacement, and the record is sealed at one session.
//! The conversion chain upgrades four gems of a tier into one of the next
//! (or breaks one back down into four), sharing the enchanting XP ledger.

use super::stats::{RarityTier, StatType};
use super::types::{
    EnchantError, EnchantLedger, EnchantOutcome, EnchantmentLine, ConvertError, InstanceId,
    ItemEnchantmentRecord,
};
use crate::constants::{GEM_CONVERT_RATIO, RAW_GEM_ID};
use crate::equipment::{Equipment, EquipmentSlot};
use crate::inventory::Inventory;
use crate::skills::{LevelUp, SkillType, Skills};
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Gems usable for ring enchantment, ascending rarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemType {
    Sapphire,
    Emerald,
    Ruby,
    Diamond,
    DragonGem,
}

impl GemType {
    pub const ALL: [GemType; 5] = [
        GemType::Sapphire,
        GemType::Emerald,
        GemType::Ruby,
        GemType::Diamond,
        GemType::DragonGem,
    ];

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        self.stage().name()
    }

    /// Inventory item id consumed by a ring enchant.
    pub fn item_id(&self) -> &'static str {
        self.stage().item_id()
    }

    pub fn stage(&self) -> GemStage {
        match self {
            GemType::Sapphire => GemStage::Sapphire,
            GemType::Emerald => GemStage::Emerald,
            GemType::Ruby => GemStage::Ruby,
            GemType::Diamond => GemStage::Diamond,
            GemType::DragonGem => GemStage::DragonGem,
        }
    }

    /// Display rarity stamped on the lines this gem produces.
    pub fn rarity(&self) -> RarityTier {
        match self {
            GemType::Sapphire => RarityTier::Common,
            GemType::Emerald => RarityTier::Uncommon,
            GemType::Ruby => RarityTier::Rare,
            GemType::Diamond => RarityTier::Epic,
            GemType::DragonGem => RarityTier::Legendary,
        }
    }

    pub fn min_stats(&self) -> u32 {
        match self {
            GemType::Sapphire | GemType::Emerald => 1,
            GemType::Ruby | GemType::Diamond => 2,
            GemType::DragonGem => 3,
        }
    }

    pub fn max_stats(&self) -> u32 {
        match self {
            GemType::Sapphire | GemType::Emerald => 2,
            GemType::Ruby => 3,
            GemType::Diamond => 4,
            GemType::DragonGem => 5,
        }
    }

    /// Fixed stat pool for this gem: `(stat, min, max)` per entry. No
    /// weights — stats are drawn uniformly without replacement.
    pub fn stat_ranges(&self) -> &'static [(StatType, f64, f64)] {
        match self {
            GemType::Sapphire => &[
                (StatType::HpFlat, 5.0, 15.0),
                (StatType::XpGain, 0.01, 0.03),
            ],
            GemType::Emerald => &[
                (StatType::HpFlat, 10.0, 25.0),
                (StatType::XpGain, 0.02, 0.05),
                (StatType::GoldFind, 0.02, 0.05),
            ],
            GemType::Ruby => &[
                (StatType::DamageFlat, 3.0, 8.0),
                (StatType::CritChance, 0.01, 0.03),
                (StatType::HpFlat, 20.0, 45.0),
                (StatType::GoldFind, 0.03, 0.08),
            ],
            GemType::Diamond => &[
                (StatType::DamageFlat, 6.0, 15.0),
                (StatType::CritChance, 0.02, 0.05),
                (StatType::CritDamage, 0.08, 0.18),
                (StatType::ArmorFlat, 5.0, 12.0),
                (StatType::HpFlat, 35.0, 80.0),
            ],
            GemType::DragonGem => &[
                (StatType::DamageFlat, 12.0, 30.0),
                (StatType::CritChance, 0.04, 0.08),
                (StatType::CritDamage, 0.15, 0.35),
                (StatType::ArmorFlat, 10.0, 25.0),
                (StatType::HpFlat, 70.0, 160.0),
                (StatType::XpGain, 0.05, 0.12),
                (StatType::GoldFind, 0.06, 0.15),
            ],
        }
    }
}

/// One step of the conversion chain, bottom (raw mining gems) to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemStage {
    Raw,
    Sapphire,
    Emerald,
    Ruby,
    Diamond,
    DragonGem,
}

impl GemStage {
    pub const ALL: [GemStage; 6] = [
        GemStage::Raw,
        GemStage::Sapphire,
        GemStage::Emerald,
        GemStage::Ruby,
        GemStage::Diamond,
        GemStage::DragonGem,
    ];

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            GemStage::Raw => "Gems",
            GemStage::Sapphire => "Sapphire",
            GemStage::Emerald => "Emerald",
            GemStage::Ruby => "Ruby",
            GemStage::Diamond => "Diamond",
            GemStage::DragonGem => "Dragon Gem",
        }
    }

    pub fn item_id(&self) -> &'static str {
        match self {
            GemStage::Raw => RAW_GEM_ID,
            GemStage::Sapphire => "sapphire",
            GemStage::Emerald => "emerald",
            GemStage::Ruby => "ruby",
            GemStage::Diamond => "diamond",
            GemStage::DragonGem => "dragon_gem",
        }
    }

    pub fn next(&self) -> Option<GemStage> {
        match self {
            GemStage::Raw => Some(GemStage::Sapphire),
            GemStage::Sapphire => Some(GemStage::Emerald),
            GemStage::Emerald => Some(GemStage::Ruby),
            GemStage::Ruby => Some(GemStage::Diamond),
            GemStage::Diamond => Some(GemStage::DragonGem),
            GemStage::DragonGem => None,
        }
    }

    pub fn prev(&self) -> Option<GemStage> {
        match self {
            GemStage::Raw => None,
            GemStage::Sapphire => Some(GemStage::Raw),
            GemStage::Emerald => Some(GemStage::Sapphire),
            GemStage::Ruby => Some(GemStage::Emerald),
            GemStage::Diamond => Some(GemStage::Ruby),
            GemStage::DragonGem => Some(GemStage::Diamond),
        }
    }

    /// Enchanting XP granted when an upgrade produces this stage.
    fn upgrade_xp(&self) -> u64 {
        match self {
            GemStage::Raw => 0,
            GemStage::Sapphire => 5,
            GemStage::Emerald => 15,
            GemStage::Ruby => 40,
            GemStage::Diamond => 100,
            GemStage::DragonGem => 250,
        }
    }
}

/// Result of a gem conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOutcome {
    pub consumed: &'static str,
    pub produced: &'static str,
    pub xp_gained: u64,
    pub level_up: Option<LevelUp>,
}

/// Enchants the ring equipped in `slot` with a single gem. One shot: once a
/// ring record exists its session count stays at 1 forever.
pub fn enchant_ring<R: Rng>(
    slot: EquipmentSlot,
    gem: GemType,
    ledger: &mut EnchantLedger,
    inventory: &mut Inventory,
    equipment: &mut Equipment,
    rng: &mut R,
) -> Result<EnchantOutcome, EnchantError> {
    if !slot.is_ring() {
        return Err(EnchantError::NotRingSlot);
    }
    let equipped = equipment
        .get(slot)
        .cloned()
        .ok_or(EnchantError::NoItemEquipped)?;

    let already = equipped
        .instance
        .and_then(|instance| ledger.get(instance))
        .map_or(false, |record| record.session_count >= 1);
    if already {
        return Err(EnchantError::RingAlreadyEnchanted);
    }

    if !inventory.has(gem.item_id(), 1) {
        return Err(EnchantError::InsufficientGems {
            gem: gem.item_id(),
        });
    }

    // Preconditions hold; consume the gem and split the ring off its stack.
    inventory.remove(gem.item_id(), 1);
    if !inventory.remove(&equipped.item_id, 1) {
        log::warn!(
            "stack for {} was already empty when splitting off an enchanted copy",
            equipped.item_id
        );
    }

    let mut record =
        ItemEnchantmentRecord::new(slot, equipped.item_id.clone(), Utc::now().timestamp());
    let mut pool = gem.stat_ranges().to_vec();
    let requested = rng.gen_range(gem.min_stats()..=gem.max_stats());
    let draws = (requested as usize).min(pool.len());
    for _ in 0..draws {
        let index = rng.gen_range(0..pool.len());
        let (stat, min, max) = pool.swap_remove(index);
        record.enchantments.push(EnchantmentLine {
            stat,
            value: rng.gen_range(min..=max),
            tier: gem.rarity(),
            locked: false,
        });
    }
    record.session_count = 1;

    let lines = record.enchantments.clone();
    let instance = InstanceId::new();
    ledger.insert(instance, record);
    equipment.set_instance(slot, instance);
    log::info!(
        "socketed {} into {} ({} lines)",
        gem.item_id(),
        equipped.item_id,
        lines.len()
    );

    Ok(EnchantOutcome {
        lines,
        session_count: 1,
        xp_gained: 0,
        level_up: None,
    })
}

/// Upgrades four gems of `stage` into one of the next stage.
pub fn upgrade_gems(
    stage: GemStage,
    inventory: &mut Inventory,
    skills: &mut Skills,
) -> Result<ConvertOutcome, ConvertError> {
    let next = stage.next().ok_or(ConvertError::AtChainTop)?;
    let held = inventory.quantity(stage.item_id());
    if held < GEM_CONVERT_RATIO {
        return Err(ConvertError::InsufficientGems {
            required: GEM_CONVERT_RATIO,
            held,
        });
    }

    inventory.remove(stage.item_id(), GEM_CONVERT_RATIO);
    inventory.add(next.item_id(), 1);
    let xp_gained = next.upgrade_xp();
    let level_up = skills.add_xp(SkillType::Enchanting, xp_gained);

    Ok(ConvertOutcome {
        consumed: stage.item_id(),
        produced: next.item_id(),
        xp_gained,
        level_up,
    })
}

/// Breaks one gem of `stage` back down into four of the previous stage.
/// No XP — only upgrades teach anything.
pub fn downgrade_gems(
    stage: GemStage,
    inventory: &mut Inventory,
) -> Result<ConvertOutcome, ConvertError> {
    let prev = stage.prev().ok_or(ConvertError::AtChainBottom)?;
    let held = inventory.quantity(stage.item_id());
    if held < 1 {
        return Err(ConvertError::InsufficientGems { required: 1, held });
    }

    inventory.remove(stage.item_id(), 1);
    inventory.add(prev.item_id(), GEM_CONVERT_RATIO);

    Ok(ConvertOutcome {
        consumed: stage.item_id(),
        produced: prev.item_id(),
        xp_gained: 0,
        level_up: None,
    })
}
