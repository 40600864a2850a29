//! Enchant session tests: roll properties, preconditions, reconciliation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use runeforge::constants::{MAGIC_ESSENCE_ID, MAX_ENCHANT_SESSIONS};
use runeforge::enchanting::{
    perform_enchant, roll, EnchantError, EnchantLedger, EnchantTier, EnchantmentLine, RarityTier,
    StatType,
};
use runeforge::equipment::{Equipment, EquipmentSlot};
use runeforge::game_state::GameState;
use runeforge::inventory::Inventory;
use runeforge::skills::{SkillType, Skills};
use runeforge::structures::{BuiltStructures, StructureId};

fn rich_state(slot: EquipmentSlot, item_id: &str) -> GameState {
    let mut state = GameState::new("Tester".to_string(), 0);
    state.inventory.add_gold(10_000_000);
    state.inventory.add(MAGIC_ESSENCE_ID, 100_000);
    state.inventory.add("arcane_rune", 100_000);
    state.inventory.add("dragon_scale", 100_000);
    state.inventory.add(item_id, 5);
    state.equipment.equip(slot, item_id);
    state.skills.add_xp(SkillType::Enchanting, 10_000_000);
    state
}

// =========================================================================
// Scenario: common enchant on an axe with no structures built
// =========================================================================

#[test]
fn test_common_axe_roll_produces_one_or_two_common_tool_lines() {
    let structures = BuiltStructures::new();
    let mut rng = ChaCha8Rng::seed_from_u64(100);

    for _ in 0..500 {
        let lines = roll(
            EquipmentSlot::Axe,
            EnchantTier::Common,
            &[],
            &structures,
            &mut rng,
        );
        assert!((1..=2).contains(&lines.len()));
        for line in &lines {
            assert!(line.stat.applicability().includes(EquipmentSlot::Axe));
            assert_eq!(line.tier, RarityTier::Common);
            let profile = line.stat.tier_profile(RarityTier::Common).unwrap();
            assert!(line.value >= profile.min && line.value <= profile.max);
            // Wizard stats are weapon-only and can never land on an axe.
            assert!(!line.stat.is_wizard_exclusive());
        }
    }
}

// =========================================================================
// Scenario: locked epic fire damage line on a weapon, tower built
// =========================================================================

#[test]
fn test_locked_fire_line_survives_and_never_duplicates() {
    let mut structures = BuiltStructures::new();
    structures.build(StructureId::WizardTower);
    let fire = EnchantmentLine {
        stat: StatType::FireDamage,
        value: 22.0,
        tier: RarityTier::Epic,
        locked: true,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(101);

    for _ in 0..500 {
        let lines = roll(
            EquipmentSlot::Weapon,
            EnchantTier::Legendary,
            &[fire.clone()],
            &structures,
            &mut rng,
        );
        let fire_lines: Vec<&EnchantmentLine> = lines
            .iter()
            .filter(|line| line.stat == StatType::FireDamage)
            .collect();
        assert_eq!(fire_lines.len(), 1);
        assert_eq!(*fire_lines[0], fire);
    }
}

// =========================================================================
// Scenario: session cap
// =========================================================================

#[test]
fn test_enchant_at_cap_fails_without_mutation() {
    let mut state = rich_state(EquipmentSlot::Axe, "bronze_axe");

    state.enchant(EquipmentSlot::Axe, EnchantTier::Common).unwrap();
    let instance = state
        .equipment
        .get(EquipmentSlot::Axe)
        .unwrap()
        .instance
        .unwrap();
    state.ledger.get_mut(instance).unwrap().session_count = MAX_ENCHANT_SESSIONS;

    let gold_before = state.inventory.gold;
    let essence_before = state.inventory.quantity(MAGIC_ESSENCE_ID);
    let lines_before = state.active_enchantments(EquipmentSlot::Axe).to_vec();

    let result = state.enchant(EquipmentSlot::Axe, EnchantTier::Common);
    assert_eq!(result, Err(EnchantError::MaxSessionsReached));
    assert_eq!(state.inventory.gold, gold_before);
    assert_eq!(state.inventory.quantity(MAGIC_ESSENCE_ID), essence_before);
    assert_eq!(state.active_enchantments(EquipmentSlot::Axe), lines_before);
    assert_eq!(state.session_count(EquipmentSlot::Axe), MAX_ENCHANT_SESSIONS);
}

// =========================================================================
// Session monotonicity
// =========================================================================

#[test]
fn test_session_count_increments_to_cap() {
    let mut state = rich_state(EquipmentSlot::Weapon, "steel_sword");

    for expected in 1..=MAX_ENCHANT_SESSIONS {
        let outcome = state
            .enchant(EquipmentSlot::Weapon, EnchantTier::Common)
            .unwrap();
        assert_eq!(outcome.session_count, expected);
        assert_eq!(state.session_count(EquipmentSlot::Weapon), expected);
    }
    let result = state.enchant(EquipmentSlot::Weapon, EnchantTier::Common);
    assert_eq!(result, Err(EnchantError::MaxSessionsReached));
}

// =========================================================================
// Stack/ledger conservation
// =========================================================================

#[test]
fn test_total_owned_invariant_across_enchants_and_sells() {
    let mut state = rich_state(EquipmentSlot::Axe, "bronze_axe");
    assert_eq!(state.total_owned("bronze_axe"), 5);

    // First enchant splits one copy off the stack into the ledger.
    state.enchant(EquipmentSlot::Axe, EnchantTier::Common).unwrap();
    assert_eq!(state.inventory.quantity("bronze_axe"), 4);
    assert_eq!(state.ledger.count_for_item("bronze_axe"), 1);
    assert_eq!(state.total_owned("bronze_axe"), 5);

    // Further sessions move nothing between the buckets.
    state.enchant(EquipmentSlot::Axe, EnchantTier::Uncommon).unwrap();
    assert_eq!(state.total_owned("bronze_axe"), 5);

    // Selling the instance is an explicit removal: total drops by one.
    state.sell_enchanted(EquipmentSlot::Axe, 100).unwrap();
    assert_eq!(state.inventory.quantity("bronze_axe"), 4);
    assert_eq!(state.ledger.count_for_item("bronze_axe"), 0);
    assert_eq!(state.total_owned("bronze_axe"), 4);
}

#[test]
fn test_two_copies_of_same_base_item_enchant_independently() {
    let mut state = rich_state(EquipmentSlot::Axe, "bronze_axe");

    state.enchant(EquipmentSlot::Axe, EnchantTier::Common).unwrap();
    let first = state
        .equipment
        .get(EquipmentSlot::Axe)
        .unwrap()
        .instance
        .unwrap();

    // Swap in a fresh unenchanted copy and enchant it too.
    state.equipment.equip(EquipmentSlot::Axe, "bronze_axe");
    state.enchant(EquipmentSlot::Axe, EnchantTier::Common).unwrap();
    let second = state
        .equipment
        .get(EquipmentSlot::Axe)
        .unwrap()
        .instance
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(state.ledger.count_for_item("bronze_axe"), 2);
    assert_eq!(state.inventory.quantity("bronze_axe"), 3);
    assert_eq!(state.total_owned("bronze_axe"), 5);
    assert_eq!(state.ledger.get(first).unwrap().session_count, 1);
}

// =========================================================================
// Preconditions are checked before any mutation
// =========================================================================

#[test]
fn test_failed_preconditions_leave_state_untouched() {
    let mut ledger = EnchantLedger::new();
    let mut inventory = Inventory::new();
    let mut skills = Skills::new();
    let mut equipment = Equipment::new();
    let structures = BuiltStructures::new();
    let mut rng = ChaCha8Rng::seed_from_u64(102);

    inventory.add_gold(1_000_000);
    inventory.add(MAGIC_ESSENCE_ID, 1_000);
    inventory.add("steel_sword", 1);
    equipment.equip(EquipmentSlot::Weapon, "steel_sword");

    // Level gate trips before any cost is paid.
    let result = perform_enchant(
        EquipmentSlot::Weapon,
        EnchantTier::Rare,
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
            required: 25,
            level: 1
        })
    );
    assert_eq!(inventory.gold, 1_000_000);
    assert_eq!(inventory.quantity("steel_sword"), 1);
    assert!(ledger.is_empty());
    assert_eq!(skills.get(SkillType::Enchanting).xp, 0);
}

#[test]
fn test_xp_grants_level_ups_through_sessions() {
    let mut state = GameState::new("Tester".to_string(), 0);
    state.inventory.add_gold(100_000);
    state.inventory.add(MAGIC_ESSENCE_ID, 1_000);
    state.inventory.add("steel_sword", 1);
    state.equipment.equip(EquipmentSlot::Weapon, "steel_sword");

    // 10 XP per common session; level 2 needs 100.
    let mut level_up = None;
    for _ in 0..10 {
        let outcome = state
            .enchant(EquipmentSlot::Weapon, EnchantTier::Common)
            .unwrap();
        if outcome.level_up.is_some() {
            level_up = outcome.level_up;
        }
    }
    let level_up = level_up.expect("ten sessions should cross the first threshold");
    assert_eq!(level_up.skill, SkillType::Enchanting);
    assert_eq!(level_up.old_level, 1);
    assert_eq!(level_up.new_level, 2);
    assert_eq!(state.skills.level(SkillType::Enchanting), 2);
}

// =========================================================================
// Structure gates are re-read every session
// =========================================================================

#[test]
fn test_wizard_stats_appear_only_after_tower_is_built() {
    let mut state = rich_state(EquipmentSlot::Weapon, "steel_sword");

    // No tower: many sessions, never a wizard stat.
    for _ in 0..30 {
        let outcome = state
            .enchant(EquipmentSlot::Weapon, EnchantTier::Legendary)
            .unwrap();
        assert!(outcome.lines.iter().all(|line| !line.stat.is_wizard_exclusive()));
        // Reset the record so the cap never interferes.
        state.sell_enchanted(EquipmentSlot::Weapon, 0);
        state.inventory.add("steel_sword", 1);
        state.equipment.equip(EquipmentSlot::Weapon, "steel_sword");
    }

    // Build the tower mid-game: the pool picks the stats up immediately.
    state.structures.build(StructureId::WizardTower);
    let mut seen_wizard = false;
    for _ in 0..60 {
        let outcome = state
            .enchant(EquipmentSlot::Weapon, EnchantTier::Legendary)
            .unwrap();
        seen_wizard |= outcome.lines.iter().any(|line| line.stat.is_wizard_exclusive());
        state.sell_enchanted(EquipmentSlot::Weapon, 0);
        state.inventory.add("steel_sword", 1);
        state.equipment.equip(EquipmentSlot::Weapon, "steel_sword");
    }
    assert!(seen_wizard, "tower built but no wizard stat in 60 sessions");
}
