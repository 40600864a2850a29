//! Line locking: pin a rolled line so future sessions cannot reroll it.
//!
//! Locking charges arcane dust by the line's rarity; unlocking is always
//! free and refunds nothing. Toggling never touches the session count or
//! the line's rolled payload.

use super::stats::RarityTier;
use super::types::{EnchantLedger, LockError, LockToggle};
use crate::constants::{ARCANE_DUST_ID, MAX_LOCKED_LINES};
use crate::equipment::{Equipment, EquipmentSlot};
use crate::inventory::Inventory;

/// Arcane dust charged to lock a line of the given rarity.
pub fn lock_cost(tier: RarityTier) -> u32 {
    match tier {
        RarityTier::Common => 1,
        RarityTier::Uncommon => 5,
        RarityTier::Rare => 20,
        RarityTier::Epic => 50,
        RarityTier::Legendary => 100,
    }
}

/// Toggles the lock on one enchantment line of the item equipped in `slot`.
pub fn toggle_lock(
    slot: EquipmentSlot,
    line_index: usize,
    ledger: &mut EnchantLedger,
    inventory: &mut Inventory,
    equipment: &Equipment,
) -> Result<LockToggle, LockError> {
    if slot.is_ring() {
        return Err(LockError::NotLockable);
    }
    let instance = equipment
        .get(slot)
        .and_then(|equipped| equipped.instance)
        .ok_or(LockError::NotEnchanted)?;
    let record = ledger.get(instance).ok_or(LockError::NotEnchanted)?;
    let line = record
        .enchantments
        .get(line_index)
        .ok_or(LockError::LineNotFound { index: line_index })?;

    if line.locked {
        // Unlocking is unconditional: no cost, no refund.
        if let Some(record) = ledger.get_mut(instance) {
            if let Some(line) = record.enchantments.get_mut(line_index) {
                line.locked = false;
            }
        }
        return Ok(LockToggle::Unlocked);
    }

    if record.locked_count() >= MAX_LOCKED_LINES {
        return Err(LockError::MaxLockedReached);
    }
    let cost = lock_cost(line.tier);
    let held = inventory.quantity(ARCANE_DUST_ID);
    if held < cost {
        return Err(LockError::InsufficientLockCurrency {
            required: cost,
            held,
        });
    }

    inventory.remove(ARCANE_DUST_ID, cost);
    if let Some(record) = ledger.get_mut(instance) {
        if let Some(line) = record.enchantments.get_mut(line_index) {
            line.locked = true;
        }
    }
    log::debug!("locked line {} for {} dust", line_index, cost);
    Ok(LockToggle::Locked { cost })
}
