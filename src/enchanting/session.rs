//! The enchant session: precondition gate, cost deduction, roll commit.
//!
//! All preconditions are validated before the first write, so a failed call
//! leaves every piece of state untouched — there is no rollback path.

use super::roller::roll;
use super::tiers::EnchantTier;
use super::types::{
    EnchantError, EnchantLedger, EnchantOutcome, InstanceId, ItemEnchantmentRecord,
};
use crate::constants::MAX_ENCHANT_SESSIONS;
use crate::equipment::{Equipment, EquipmentSlot};
use crate::inventory::Inventory;
use crate::skills::{SkillType, Skills};
use crate::structures::BuiltStructures;
use chrono::Utc;
use rand::Rng;

/// Runs one enchant session against the item equipped in `slot`.
///
/// On the first session for a copy, the record is created, the base item's
/// stack is decremented by one, and the equipment slot gains a pointer to
/// the new instance.
pub fn perform_enchant<R: Rng>(
    slot: EquipmentSlot,
    tier: EnchantTier,
    ledger: &mut EnchantLedger,
    inventory: &mut Inventory,
    skills: &mut Skills,
    equipment: &mut Equipment,
    structures: &BuiltStructures,
    rng: &mut R,
) -> Result<EnchantOutcome, EnchantError> {
    if slot.is_ring() {
        return Err(EnchantError::RingSlot);
    }
    let equipped = equipment
        .get(slot)
        .cloned()
        .ok_or(EnchantError::NoItemEquipped)?;

    let level = skills.level(SkillType::Enchanting);
    let required = tier.level_requirement();
    if level < required {
        return Err(EnchantError::LevelTooLow { required, level });
    }

    let existing_instance = equipped.instance.filter(|id| ledger.get(*id).is_some());
    if let Some(instance) = existing_instance {
        if let Some(record) = ledger.get(instance) {
            if record.session_count >= MAX_ENCHANT_SESSIONS {
                return Err(EnchantError::MaxSessionsReached);
            }
        }
    }

    let cost = tier.cost();
    if inventory.gold < cost.gold {
        return Err(EnchantError::InsufficientGold {
            required: cost.gold,
            held: inventory.gold,
        });
    }
    for &(resource, required) in cost.resources {
        let held = inventory.quantity(resource);
        if held < required {
            return Err(EnchantError::InsufficientResources {
                resource,
                required,
                held,
            });
        }
    }

    // All preconditions hold; mutation starts here.
    inventory.spend_gold(cost.gold);
    for &(resource, quantity) in cost.resources {
        inventory.remove(resource, quantity);
    }

    let instance = match existing_instance {
        Some(instance) => instance,
        None => {
            // First session: split this copy off the fungible stack.
            if !inventory.remove(&equipped.item_id, 1) {
                log::warn!(
                    "stack for {} was already empty when splitting off an enchanted copy",
                    equipped.item_id
                );
            }
            let instance = InstanceId::new();
            ledger.insert(
                instance,
                ItemEnchantmentRecord::new(slot, equipped.item_id.clone(), Utc::now().timestamp()),
            );
            equipment.set_instance(slot, instance);
            log::info!(
                "created enchantment record {} for {}",
                instance,
                equipped.item_id
            );
            instance
        }
    };

    let existing_lines = ledger
        .get(instance)
        .map(|record| record.enchantments.clone())
        .unwrap_or_default();
    let lines = roll(slot, tier, &existing_lines, structures, rng);

    let mut session_count = 0;
    if let Some(record) = ledger.get_mut(instance) {
        record.enchantments = lines.clone();
        record.session_count += 1;
        session_count = record.session_count;
    }

    let xp_gained = tier.xp_reward();
    let level_up = skills.add_xp(SkillType::Enchanting, xp_gained);
    log::debug!(
        "enchanted {} at {:?}: {} lines, session {}",
        equipped.item_id,
        tier,
        lines.len(),
        session_count
    );

    Ok(EnchantOutcome {
        lines,
        session_count,
        xp_gained,
        level_up,
    })
}

/// Removes the enchanted instance equipped in `slot` — the sell/destroy
/// path. Deletes the ledger record, empties the slot, and hands the record
/// back to the caller. The stack is untouched: the enchanted copy stopped
/// being stack quantity when it was first enchanted.
pub fn remove_enchanted_instance(
    slot: EquipmentSlot,
    ledger: &mut EnchantLedger,
    equipment: &mut Equipment,
) -> Option<ItemEnchantmentRecord> {
    let instance = equipment.get(slot).and_then(|equipped| equipped.instance)?;
    equipment.unequip(slot);
    let record = ledger.remove(instance);
    if record.is_some() {
        log::info!("removed enchantment record {}", instance);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAGIC_ESSENCE_ID;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (EnchantLedger, Inventory, Skills, Equipment, BuiltStructures) {
        let mut inventory = Inventory::new();
        inventory.add_gold(1_000_000);
        inventory.add(MAGIC_ESSENCE_ID, 10_000);
        inventory.add("bronze_axe", 3);

        let mut equipment = Equipment::new();
        equipment.equip(EquipmentSlot::Axe, "bronze_axe");

        (
            EnchantLedger::new(),
            inventory,
            Skills::new(),
            equipment,
            BuiltStructures::new(),
        )
    }

    #[test]
    fn test_first_enchant_splits_stack_and_creates_record() {
        let (mut ledger, mut inventory, mut skills, mut equipment, structures) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = perform_enchant(
            EquipmentSlot::Axe,
            EnchantTier::Common,
            &mut ledger,
            &mut inventory,
            &mut skills,
            &mut equipment,
            &structures,
            &mut rng,
        )
        .unwrap();

        assert_eq!(outcome.session_count, 1);
        assert_eq!(inventory.quantity("bronze_axe"), 2);
        assert_eq!(ledger.len(), 1);
        assert!(equipment
            .get(EquipmentSlot::Axe)
            .unwrap()
            .instance
            .is_some());
    }

    #[test]
    fn test_second_enchant_reuses_record() {
        let (mut ledger, mut inventory, mut skills, mut equipment, structures) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        for expected in 1..=3 {
            let outcome = perform_enchant(
                EquipmentSlot::Axe,
                EnchantTier::Common,
                &mut ledger,
                &mut inventory,
                &mut skills,
                &mut equipment,
                &structures,
                &mut rng,
            )
            .unwrap();
            assert_eq!(outcome.session_count, expected);
        }
        // Stack only split once.
        assert_eq!(inventory.quantity("bronze_axe"), 2);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_no_item_equipped() {
        let (mut ledger, mut inventory, mut skills, mut equipment, structures) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let result = perform_enchant(
            EquipmentSlot::Weapon,
            EnchantTier::Common,
            &mut ledger,
            &mut inventory,
            &mut skills,
            &mut equipment,
            &structures,
            &mut rng,
        );
        assert_eq!(result, Err(EnchantError::NoItemEquipped));
    }

    #[test]
    fn test_ring_slot_rejected() {
        let (mut ledger, mut inventory, mut skills, mut equipment, structures) = setup();
        equipment.equip(EquipmentSlot::LeftRing, "gold_ring");
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let result = perform_enchant(
            EquipmentSlot::LeftRing,
            EnchantTier::Common,
            &mut ledger,
            &mut inventory,
            &mut skills,
            &mut equipment,
            &structures,
            &mut rng,
        );
        assert_eq!(result, Err(EnchantError::RingSlot));
    }

    #[test]
    fn test_level_too_low_deducts_nothing() {
        let (mut ledger, mut inventory, mut skills, mut equipment, structures) = setup();
        let gold_before = inventory.gold;
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let result = perform_enchant(
            EquipmentSlot::Axe,
            EnchantTier::Legendary,
            &mut ledger,
            &mut inventory,
            &mut skills,
            &mut equipment,
            &structures,
            &mut rng,
        );
        assert_eq!(
            result,
            Err(EnchantError::LevelTooLow {
                required: 55,
                level: 1
            })
        );
        assert_eq!(inventory.gold, gold_before);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_insufficient_gold() {
        let (mut ledger, mut inventory, mut skills, mut equipment, structures) = setup();
        inventory.gold = 10;
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let result = perform_enchant(
            EquipmentSlot::Axe,
            EnchantTier::Common,
            &mut ledger,
            &mut inventory,
            &mut skills,
            &mut equipment,
            &structures,
            &mut rng,
        );
        assert_eq!(
            result,
            Err(EnchantError::InsufficientGold {
                required: 50,
                held: 10
            })
        );
        assert_eq!(inventory.gold, 10);
        assert_eq!(inventory.quantity("bronze_axe"), 3);
    }

    #[test]
    fn test_insufficient_resources() {
        let (mut ledger, mut inventory, mut skills, mut equipment, structures) = setup();
        inventory.remove(MAGIC_ESSENCE_ID, 10_000);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let result = perform_enchant(
            EquipmentSlot::Axe,
            EnchantTier::Common,
            &mut ledger,
            &mut inventory,
            &mut skills,
            &mut equipment,
            &structures,
            &mut rng,
        );
        assert_eq!(
            result,
            Err(EnchantError::InsufficientResources {
                resource: MAGIC_ESSENCE_ID,
                required: 1,
                held: 0
            })
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_max_sessions_reached() {
        let (mut ledger, mut inventory, mut skills, mut equipment, structures) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(8);

        perform_enchant(
            EquipmentSlot::Axe,
            EnchantTier::Common,
            &mut ledger,
            &mut inventory,
            &mut skills,
            &mut equipment,
            &structures,
            &mut rng,
        )
        .unwrap();

        let instance = equipment.get(EquipmentSlot::Axe).unwrap().instance.unwrap();
        ledger.get_mut(instance).unwrap().session_count = MAX_ENCHANT_SESSIONS;

        let gold_before = inventory.gold;
        let lines_before = ledger.get(instance).unwrap().enchantments.clone();
        let result = perform_enchant(
            EquipmentSlot::Axe,
            EnchantTier::Common,
            &mut ledger,
            &mut inventory,
            &mut skills,
            &mut equipment,
            &structures,
            &mut rng,
        );
        assert_eq!(result, Err(EnchantError::MaxSessionsReached));
        assert_eq!(inventory.gold, gold_before);
        assert_eq!(ledger.get(instance).unwrap().enchantments, lines_before);
        assert_eq!(
            ledger.get(instance).unwrap().session_count,
            MAX_ENCHANT_SESSIONS
        );
    }

    #[test]
    fn test_enchant_grants_xp() {
        let (mut ledger, mut inventory, mut skills, mut equipment, structures) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let outcome = perform_enchant(
            EquipmentSlot::Axe,
            EnchantTier::Common,
            &mut ledger,
            &mut inventory,
            &mut skills,
            &mut equipment,
            &structures,
            &mut rng,
        )
        .unwrap();
        assert_eq!(outcome.xp_gained, 10);
        assert_eq!(skills.get(SkillType::Enchanting).xp, 10);
    }

    #[test]
    fn test_remove_enchanted_instance() {
        let (mut ledger, mut inventory, mut skills, mut equipment, structures) = setup();
        let mut rng = ChaCha8Rng::seed_from_u64(10);

        perform_enchant(
            EquipmentSlot::Axe,
            EnchantTier::Common,
            &mut ledger,
            &mut inventory,
            &mut skills,
            &mut equipment,
            &structures,
            &mut rng,
        )
        .unwrap();

        let record =
            remove_enchanted_instance(EquipmentSlot::Axe, &mut ledger, &mut equipment).unwrap();
        assert_eq!(record.base_item, "bronze_axe");
        assert!(ledger.is_empty());
        assert!(equipment.get(EquipmentSlot::Axe).is_none());
    }

    #[test]
    fn test_remove_unenchanted_is_noop() {
        let (mut ledger, _, _, mut equipment, _) = setup();
        let removed = remove_enchanted_instance(EquipmentSlot::Axe, &mut ledger, &mut equipment);
        assert!(removed.is_none());
        assert!(equipment.get(EquipmentSlot::Axe).is_some());
    }
}
