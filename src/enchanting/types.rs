//! Enchantment records, the per-instance ledger, and error kinds.

use super::gems::GemType;
use super::stats::{RarityTier, StatType};
use super::tiers::EnchantTier;
use crate::equipment::EquipmentSlot;
use crate::skills::LevelUp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identity of one enchanted item copy. Generated once at record
/// creation and never reused; this is what distinguishes two separately
/// enchanted copies of the same base item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One rolled stat line. `value` keeps full precision; display rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnchantmentLine {
    pub stat: StatType,
    pub value: f64,
    pub tier: RarityTier,
    #[serde(default)]
    pub locked: bool,
}

impl fmt::Display for EnchantmentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stat.is_percentage() {
            write!(
                f,
                "{} {} +{:.1}%",
                self.tier.name(),
                self.stat.name(),
                self.value * 100.0
            )
        } else {
            write!(
                f,
                "{} {} +{:.0}",
                self.tier.name(),
                self.stat.name(),
                self.value
            )
        }
    }
}

/// Persistent enchantment state for one item instance.
///
/// `enchantments` is replaced wholesale on every session (locked lines plus
/// the fresh roll); `session_count` only ever increments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEnchantmentRecord {
    pub slot: EquipmentSlot,
    pub base_item: String,
    pub enchantments: Vec<EnchantmentLine>,
    pub session_count: u32,
    pub created_at: i64,
}

impl ItemEnchantmentRecord {
    pub fn new(slot: EquipmentSlot, base_item: String, created_at: i64) -> Self {
        Self {
            slot,
            base_item,
            enchantments: Vec::new(),
            session_count: 0,
            created_at,
        }
    }

    pub fn locked_count(&self) -> usize {
        self.enchantments.iter().filter(|line| line.locked).count()
    }

    pub fn locked_lines(&self) -> impl Iterator<Item = &EnchantmentLine> {
        self.enchantments.iter().filter(|line| line.locked)
    }
}

/// The map from instance id to enchantment record. This is the persisted
/// core state of the subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnchantLedger {
    records: HashMap<InstanceId, ItemEnchantmentRecord>,
}

impl EnchantLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, instance: InstanceId) -> Option<&ItemEnchantmentRecord> {
        self.records.get(&instance)
    }

    pub fn get_mut(&mut self, instance: InstanceId) -> Option<&mut ItemEnchantmentRecord> {
        self.records.get_mut(&instance)
    }

    pub fn insert(&mut self, instance: InstanceId, record: ItemEnchantmentRecord) {
        self.records.insert(instance, record);
    }

    pub fn remove(&mut self, instance: InstanceId) -> Option<ItemEnchantmentRecord> {
        self.records.remove(&instance)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &ItemEnchantmentRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Number of live records for a base item — each one accounts for a
    /// copy split off the fungible stack.
    pub fn count_for_item(&self, base_item: &str) -> u32 {
        self.records
            .values()
            .filter(|record| record.base_item == base_item)
            .count() as u32
    }
}

/// Result of one successful enchant session (tiered or gem).
#[derive(Debug, Clone, PartialEq)]
pub struct EnchantOutcome {
    pub lines: Vec<EnchantmentLine>,
    pub session_count: u32,
    pub xp_gained: u64,
    pub level_up: Option<LevelUp>,
}

/// Result of a successful lock toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockToggle {
    Locked { cost: u32 },
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnchantError {
    #[error("no item is equipped in that slot")]
    NoItemEquipped,
    #[error("rings are enchanted with gems, not tiered services")]
    RingSlot,
    #[error("only rings accept gem enchantments")]
    NotRingSlot,
    #[error("enchanting level {level} is below the required level {required}")]
    LevelTooLow { required: u32, level: u32 },
    #[error("this item cannot be enchanted any further")]
    MaxSessionsReached,
    #[error("not enough gold: need {required}, have {held}")]
    InsufficientGold { required: u64, held: u64 },
    #[error("not enough {resource}: need {required}, have {held}")]
    InsufficientResources {
        resource: &'static str,
        required: u32,
        held: u32,
    },
    #[error("this ring has already been enchanted")]
    RingAlreadyEnchanted,
    #[error("no {gem} in inventory")]
    InsufficientGems { gem: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LockError {
    #[error("the equipped item has no enchantments")]
    NotEnchanted,
    #[error("no enchantment line at index {index}")]
    LineNotFound { index: usize },
    #[error("gem enchantments cannot be locked")]
    NotLockable,
    #[error("no more lines can be locked on this item")]
    MaxLockedReached,
    #[error("not enough arcane dust: need {required}, have {held}")]
    InsufficientLockCurrency { required: u32, held: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("dragon gems are the top of the chain")]
    AtChainTop,
    #[error("raw gems are the bottom of the chain")]
    AtChainBottom,
    #[error("not enough gems: need {required}, have {held}")]
    InsufficientGems { required: u32, held: u32 },
}

/// Transient enchanting-screen selection. Purely presentational; cancelling
/// a preview resets it without touching any ledger state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnchantSelection {
    pub slot: Option<EquipmentSlot>,
    pub tier: Option<EnchantTier>,
    pub gem: Option<GemType>,
}

impl EnchantSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tier(&mut self, slot: EquipmentSlot, tier: EnchantTier) {
        self.slot = Some(slot);
        self.tier = Some(tier);
        self.gem = None;
    }

    pub fn select_gem(&mut self, slot: EquipmentSlot, gem: GemType) {
        self.slot = Some(slot);
        self.gem = Some(gem);
        self.tier = None;
    }

    pub fn cancel_preview(&mut self) {
        *self = Self::new();
    }
}
