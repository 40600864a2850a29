//! Skill levels and experience tracking.

use crate::constants::{XP_CURVE_BASE, XP_CURVE_EXPONENT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillType {
    Woodcutting,
    Mining,
    Combat,
    Crafting,
    Enchanting,
}

impl SkillType {
    pub const ALL: [SkillType; 5] = [
        SkillType::Woodcutting,
        SkillType::Mining,
        SkillType::Combat,
        SkillType::Crafting,
        SkillType::Enchanting,
    ];

    /// Display name for the skill.
    pub fn name(&self) -> &'static str {
        match self {
            SkillType::Woodcutting => "Woodcutting",
            SkillType::Mining => "Mining",
            SkillType::Combat => "Combat",
            SkillType::Crafting => "Crafting",
            SkillType::Enchanting => "Enchanting",
        }
    }
}

/// Calculates the XP required to advance from `level` to `level + 1`.
pub fn xp_for_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level as f64, XP_CURVE_EXPONENT)) as u64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProgress {
    pub level: u32,
    pub xp: u64,
}

impl SkillProgress {
    pub fn new() -> Self {
        Self { level: 1, xp: 0 }
    }
}

impl Default for SkillProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Reported when an XP grant pushes a skill across one or more thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub skill: SkillType,
    pub old_level: u32,
    pub new_level: u32,
}

/// Per-skill progress for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub woodcutting: SkillProgress,
    pub mining: SkillProgress,
    pub combat: SkillProgress,
    pub crafting: SkillProgress,
    pub enchanting: SkillProgress,
}

impl Skills {
    pub fn new() -> Self {
        Self {
            woodcutting: SkillProgress::new(),
            mining: SkillProgress::new(),
            combat: SkillProgress::new(),
            crafting: SkillProgress::new(),
            enchanting: SkillProgress::new(),
        }
    }

    pub fn get(&self, skill: SkillType) -> &SkillProgress {
        match skill {
            SkillType::Woodcutting => &self.woodcutting,
            SkillType::Mining => &self.mining,
            SkillType::Combat => &self.combat,
            SkillType::Crafting => &self.crafting,
            SkillType::Enchanting => &self.enchanting,
        }
    }

    pub fn get_mut(&mut self, skill: SkillType) -> &mut SkillProgress {
        match skill {
            SkillType::Woodcutting => &mut self.woodcutting,
            SkillType::Mining => &mut self.mining,
            SkillType::Combat => &mut self.combat,
            SkillType::Crafting => &mut self.crafting,
            SkillType::Enchanting => &mut self.enchanting,
        }
    }

    pub fn level(&self, skill: SkillType) -> u32 {
        self.get(skill).level
    }

    /// Applies XP to a skill and processes any level-ups.
    /// Returns `None` when no threshold was crossed.
    pub fn add_xp(&mut self, skill: SkillType, amount: u64) -> Option<LevelUp> {
        let progress = self.get_mut(skill);
        let old_level = progress.level;
        progress.xp += amount;

        loop {
            let needed = xp_for_next_level(progress.level);
            if progress.xp >= needed {
                progress.xp -= needed;
                progress.level += 1;
            } else {
                break;
            }
        }

        if progress.level > old_level {
            Some(LevelUp {
                skill,
                old_level,
                new_level: progress.level,
            })
        } else {
            None
        }
    }
}

impl Default for Skills {
    fn default() -> Self {
        Self::new()
    }
}
