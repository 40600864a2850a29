//! Aggregate player state and convenience entry points.
//!
//! The enchanting functions themselves take the narrow state slices they
//! need; this struct just owns the slices and wires them together for
//! callers that hold a whole character.

use crate::enchanting::{
    downgrade_gems, enchant_ring, enchantment_bonus, is_enchanted, perform_enchant,
    remove_enchanted_instance, session_count, toggle_lock, total_owned, upgrade_gems,
    ConvertError, ConvertOutcome, EnchantError, EnchantLedger, EnchantOutcome, EnchantSelection,
    EnchantTier, EnchantmentLine, GemStage, GemType, ItemEnchantmentRecord, LockError, LockToggle,
    StatType,
};
use crate::equipment::{Equipment, EquipmentSlot};
use crate::inventory::Inventory;
use crate::skills::Skills;
use crate::structures::BuiltStructures;
use serde::{Deserialize, Serialize};

/// Full game state for one character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub character_id: String,
    pub character_name: String,
    pub skills: Skills,
    pub inventory: Inventory,
    pub structures: BuiltStructures,
    pub equipment: Equipment,
    pub ledger: EnchantLedger,
    pub last_save_time: i64,
    /// Transient enchanting-screen selection; never persisted.
    #[serde(skip)]
    pub selection: EnchantSelection,
}

impl GameState {
    /// Creates a new game state with default values
    pub fn new(character_name: String, current_time: i64) -> Self {
        use uuid::Uuid;

        Self {
            character_id: Uuid::new_v4().to_string(),
            character_name,
            skills: Skills::new(),
            inventory: Inventory::new(),
            structures: BuiltStructures::new(),
            equipment: Equipment::new(),
            ledger: EnchantLedger::new(),
            last_save_time: current_time,
            selection: EnchantSelection::new(),
        }
    }

    /// Runs one tiered enchant session on the item equipped in `slot`.
    pub fn enchant(
        &mut self,
        slot: EquipmentSlot,
        tier: EnchantTier,
    ) -> Result<EnchantOutcome, EnchantError> {
        perform_enchant(
            slot,
            tier,
            &mut self.ledger,
            &mut self.inventory,
            &mut self.skills,
            &mut self.equipment,
            &self.structures,
            &mut rand::thread_rng(),
        )
    }

    /// Socket a gem into the ring equipped in `slot`.
    pub fn enchant_ring(
        &mut self,
        slot: EquipmentSlot,
        gem: GemType,
    ) -> Result<EnchantOutcome, EnchantError> {
        enchant_ring(
            slot,
            gem,
            &mut self.ledger,
            &mut self.inventory,
            &mut self.equipment,
            &mut rand::thread_rng(),
        )
    }

    pub fn toggle_lock(
        &mut self,
        slot: EquipmentSlot,
        line_index: usize,
    ) -> Result<LockToggle, LockError> {
        toggle_lock(
            slot,
            line_index,
            &mut self.ledger,
            &mut self.inventory,
            &self.equipment,
        )
    }

    pub fn upgrade_gems(&mut self, stage: GemStage) -> Result<ConvertOutcome, ConvertError> {
        upgrade_gems(stage, &mut self.inventory, &mut self.skills)
    }

    pub fn downgrade_gems(&mut self, stage: GemStage) -> Result<ConvertOutcome, ConvertError> {
        downgrade_gems(stage, &mut self.inventory)
    }

    /// Sells the enchanted instance equipped in `slot` for `price` gold.
    pub fn sell_enchanted(
        &mut self,
        slot: EquipmentSlot,
        price: u64,
    ) -> Option<ItemEnchantmentRecord> {
        let record = remove_enchanted_instance(slot, &mut self.ledger, &mut self.equipment)?;
        self.inventory.add_gold(price);
        Some(record)
    }

    pub fn active_enchantments(&self, slot: EquipmentSlot) -> &[EnchantmentLine] {
        crate::enchanting::active_enchantments(slot, &self.ledger, &self.equipment)
    }

    pub fn enchantment_bonus(&self, stat: StatType, slot: Option<EquipmentSlot>) -> f64 {
        enchantment_bonus(stat, slot, &self.ledger, &self.equipment)
    }

    pub fn is_enchanted(&self, slot: EquipmentSlot) -> bool {
        is_enchanted(slot, &self.ledger, &self.equipment)
    }

    pub fn session_count(&self, slot: EquipmentSlot) -> u32 {
        session_count(slot, &self.ledger, &self.equipment)
    }

    pub fn total_owned(&self, item_id: &str) -> u32 {
        total_owned(item_id, &self.inventory, &self.ledger)
    }

    /// Abandons the pending tier/gem selection. No ledger effect.
    pub fn cancel_preview(&mut self) {
        self.selection.cancel_preview();
    }
}
