//! Guild structure registry.
//!
//! Structures gate parts of the enchanting stat pool: the stat filter
//! re-reads this registry on every roll, so building (or losing) a
//! structure between sessions changes the next roll's pool.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureId {
    Sawmill,
    Forge,
    WizardTower,
    GuildHall,
}

impl StructureId {
    pub const ALL: [StructureId; 4] = [
        StructureId::Sawmill,
        StructureId::Forge,
        StructureId::WizardTower,
        StructureId::GuildHall,
    ];

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            StructureId::Sawmill => "Sawmill",
            StructureId::Forge => "Forge",
            StructureId::WizardTower => "Wizard Tower",
            StructureId::GuildHall => "Guild Hall",
        }
    }
}

/// The set of structures the player has built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltStructures {
    built: HashSet<StructureId>,
}

impl BuiltStructures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_built(&self, structure: StructureId) -> bool {
        self.built.contains(&structure)
    }

    pub fn build(&mut self, structure: StructureId) {
        self.built.insert(structure);
    }

    pub fn demolish(&mut self, structure: StructureId) {
        self.built.remove(&structure);
    }
}
