//! Equipped-item registry with per-slot enchanted-instance pointers.
//!
//! Each slot holds an item id plus an optional pointer into the enchantment
//! ledger. The pointer is set the first time the equipped copy is enchanted,
//! so the active record for a slot is always resolved by direct reference,
//! never by searching record contents.

use crate::enchanting::InstanceId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Helmet,
    Axe,
    Pickaxe,
    LeftRing,
    RightRing,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 7] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Helmet,
        EquipmentSlot::Axe,
        EquipmentSlot::Pickaxe,
        EquipmentSlot::LeftRing,
        EquipmentSlot::RightRing,
    ];

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Helmet => "Helmet",
            EquipmentSlot::Axe => "Axe",
            EquipmentSlot::Pickaxe => "Pickaxe",
            EquipmentSlot::LeftRing => "Left Ring",
            EquipmentSlot::RightRing => "Right Ring",
        }
    }

    /// Rings take a single gem enchantment instead of tiered sessions.
    pub fn is_ring(&self) -> bool {
        matches!(self, EquipmentSlot::LeftRing | EquipmentSlot::RightRing)
    }
}

/// One equipped copy of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub item_id: String,
    /// Ledger record for this copy, set on first enchant.
    #[serde(default)]
    pub instance: Option<InstanceId>,
}

/// Player equipment slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<EquippedItem>,
    pub armor: Option<EquippedItem>,
    pub helmet: Option<EquippedItem>,
    pub axe: Option<EquippedItem>,
    pub pickaxe: Option<EquippedItem>,
    pub left_ring: Option<EquippedItem>,
    pub right_ring: Option<EquippedItem>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquippedItem> {
        self.slot_ref(slot).as_ref()
    }

    fn slot_ref(&self, slot: EquipmentSlot) -> &Option<EquippedItem> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Axe => &self.axe,
            EquipmentSlot::Pickaxe => &self.pickaxe,
            EquipmentSlot::LeftRing => &self.left_ring,
            EquipmentSlot::RightRing => &self.right_ring,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<EquippedItem> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Axe => &mut self.axe,
            EquipmentSlot::Pickaxe => &mut self.pickaxe,
            EquipmentSlot::LeftRing => &mut self.left_ring,
            EquipmentSlot::RightRing => &mut self.right_ring,
        }
    }

    /// Equips a plain (unenchanted) copy from the stack.
    pub fn equip(&mut self, slot: EquipmentSlot, item_id: impl Into<String>) {
        *self.slot_mut(slot) = Some(EquippedItem {
            item_id: item_id.into(),
            instance: None,
        });
    }

    /// Equips a previously-enchanted copy by its ledger instance.
    pub fn equip_instance(
        &mut self,
        slot: EquipmentSlot,
        item_id: impl Into<String>,
        instance: InstanceId,
    ) {
        *self.slot_mut(slot) = Some(EquippedItem {
            item_id: item_id.into(),
            instance: Some(instance),
        });
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquippedItem> {
        self.slot_mut(slot).take()
    }

    /// Attaches a ledger instance to the currently-equipped item.
    pub fn set_instance(&mut self, slot: EquipmentSlot, instance: InstanceId) {
        if let Some(equipped) = self.slot_mut(slot).as_mut() {
            equipped.instance = Some(instance);
        }
    }

    pub fn clear_instance(&mut self, slot: EquipmentSlot) {
        if let Some(equipped) = self.slot_mut(slot).as_mut() {
            equipped.instance = None;
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = (EquipmentSlot, &EquippedItem)> {
        EquipmentSlot::ALL
            .iter()
            .filter_map(|slot| self.get(*slot).map(|item| (*slot, item)))
    }
}
