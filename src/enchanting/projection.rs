//! Read-only views over the ledger for combat math, the HUD, and the shop.
//!
//! Nothing here is stored: every query derives from the equipment registry's
//! instance pointers plus the ledger, so consumers always see the result of
//! the latest committed session.

use super::stats::StatType;
use super::types::{EnchantLedger, EnchantmentLine};
use crate::equipment::{Equipment, EquipmentSlot};
use crate::inventory::Inventory;

const NO_LINES: &[EnchantmentLine] = &[];

/// Enchantment lines currently affecting gameplay for `slot`. Empty when the
/// equipped item is an ordinary stack copy (or the slot is empty).
pub fn active_enchantments<'a>(
    slot: EquipmentSlot,
    ledger: &'a EnchantLedger,
    equipment: &Equipment,
) -> &'a [EnchantmentLine] {
    equipment
        .get(slot)
        .and_then(|equipped| equipped.instance)
        .and_then(|instance| ledger.get(instance))
        .map(|record| record.enchantments.as_slice())
        .unwrap_or(NO_LINES)
}

/// Whether the item equipped in `slot` has a ledger record.
pub fn is_enchanted(slot: EquipmentSlot, ledger: &EnchantLedger, equipment: &Equipment) -> bool {
    equipment
        .get(slot)
        .and_then(|equipped| equipped.instance)
        .and_then(|instance| ledger.get(instance))
        .is_some()
}

/// Sessions spent on the item equipped in `slot`; 0 when unenchanted.
pub fn session_count(slot: EquipmentSlot, ledger: &EnchantLedger, equipment: &Equipment) -> u32 {
    equipment
        .get(slot)
        .and_then(|equipped| equipped.instance)
        .and_then(|instance| ledger.get(instance))
        .map(|record| record.session_count)
        .unwrap_or(0)
}

/// Aggregate contribution of `stat` across equipped gear — one slot when
/// given, otherwise all of them. Consumers like the damage formula call
/// this rather than walking lines themselves.
pub fn enchantment_bonus(
    stat: StatType,
    slot: Option<EquipmentSlot>,
    ledger: &EnchantLedger,
    equipment: &Equipment,
) -> f64 {
    let sum_slot = |slot: EquipmentSlot| -> f64 {
        active_enchantments(slot, ledger, equipment)
            .iter()
            .filter(|line| line.stat == stat)
            .map(|line| line.value)
            .sum()
    };
    match slot {
        Some(slot) => sum_slot(slot),
        None => EquipmentSlot::ALL.iter().copied().map(sum_slot).sum(),
    }
}

/// Total copies of a base item the player owns: the fungible stack plus one
/// per live enchantment record. Enchanting moves a copy from the first
/// bucket to the second without changing this total.
pub fn total_owned(item_id: &str, inventory: &Inventory, ledger: &EnchantLedger) -> u32 {
    inventory.quantity(item_id) + ledger.count_for_item(item_id)
}
