//! Runeforge — enchantment engine for an incremental RPG.
//!
//! This library implements the enchanting subsystem: weighted stat rolls
//! against per-instance item records, line locking, ring gem sockets, and
//! the gem conversion chain, together with the thin collaborator registries
//! (skills, inventory, structures, equipment) they operate on.

pub mod constants;
pub mod enchanting;
pub mod equipment;
pub mod game_state;
pub mod inventory;
pub mod skills;
pub mod structures;
