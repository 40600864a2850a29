//! The enchantment roller: weighted tier selection over a slot's stat pool.
//!
//! Pure with respect to game state; the RNG is injected so tests can drive
//! it with a seeded generator.

use super::stats::{RarityTier, StatType, TierProfile};
use super::tiers::EnchantTier;
use super::types::EnchantmentLine;
use crate::equipment::EquipmentSlot;
use crate::structures::BuiltStructures;
use rand::Rng;

/// Stats rollable on `slot` for a session at `tier` right now.
///
/// Recomputed on every roll — structures built or lost between sessions
/// change the pool. A stat with no positive-weight profile inside the
/// tier's rarity set is treated as not currently rollable and skipped.
pub fn applicable_stats(
    slot: EquipmentSlot,
    tier: EnchantTier,
    structures: &BuiltStructures,
) -> Vec<StatType> {
    StatType::ALL
        .iter()
        .copied()
        .filter(|stat| stat.applicability().includes(slot))
        .filter(|stat| match stat.required_structure() {
            Some(structure) => structures.is_built(structure),
            None => true,
        })
        .filter(|stat| !rollable_profiles(*stat, tier).is_empty())
        .collect()
}

/// Positive-weight tier profiles for a stat, restricted to the rarities the
/// service tier can produce.
fn rollable_profiles(stat: StatType, tier: EnchantTier) -> Vec<(RarityTier, TierProfile)> {
    tier.possible_rarities()
        .iter()
        .filter_map(|rarity| {
            stat.tier_profile(*rarity)
                .filter(|profile| profile.weight > 0.0)
                .map(|profile| (*rarity, profile))
        })
        .collect()
}

/// Roulette-wheel selection over the candidate profiles. The last candidate
/// absorbs any floating-point remainder.
fn pick_rarity<R: Rng>(
    candidates: &[(RarityTier, TierProfile)],
    rng: &mut R,
) -> Option<(RarityTier, TierProfile)> {
    let last = *candidates.last()?;
    let total: f64 = candidates.iter().map(|(_, profile)| profile.weight).sum();
    let mut remainder = rng.gen::<f64>() * total;
    for (rarity, profile) in candidates {
        remainder -= profile.weight;
        if remainder < 0.0 {
            return Some((*rarity, *profile));
        }
    }
    Some(last)
}

/// Rolls a fresh enchantment list for one session.
///
/// Locked lines in `existing` pass through unchanged and the rest are
/// discarded. Wizard-exclusive stats already present anywhere in `existing`
/// are excluded for this call only; the check deliberately looks at the
/// current lines, not history, so a wizard line that gets rolled away
/// re-opens that stat on the next session.
pub fn roll<R: Rng>(
    slot: EquipmentSlot,
    tier: EnchantTier,
    existing: &[EnchantmentLine],
    structures: &BuiltStructures,
    rng: &mut R,
) -> Vec<EnchantmentLine> {
    let mut result: Vec<EnchantmentLine> = existing
        .iter()
        .filter(|line| line.locked)
        .cloned()
        .collect();

    let mut pool = applicable_stats(slot, tier, structures);
    pool.retain(|stat| {
        !(stat.is_wizard_exclusive() && existing.iter().any(|line| line.stat == *stat))
    });

    let line_count = rng.gen_range(1..=tier.max_lines());
    for _ in 0..line_count {
        if pool.is_empty() {
            // Partial rolls are fine; an exhausted pool just ends the session short.
            break;
        }
        let index = rng.gen_range(0..pool.len());
        let stat = pool[index];
        if stat.is_wizard_exclusive() {
            pool.swap_remove(index);
        }

        let candidates = rollable_profiles(stat, tier);
        let (rarity, profile) = match pick_rarity(&candidates, rng) {
            Some(picked) => picked,
            None => continue,
        };
        let value = rng.gen_range(profile.min..=profile.max);
        result.push(EnchantmentLine {
            stat,
            value,
            tier: rarity,
            locked: false,
        });
    }

    result
}
