//! Unit-related domain events
//!
//! These communicate what happened when unit state was modified,
//! allowing callers to react appropriately.

use crate::game_systems::progression::LevelUp;

/// Outcome of applying damage to a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Unit took damage but survived
    Wounded { damage_dealt: i32, remaining_health: i32 },
    /// Unit's health reached zero or below; it must be removed
    Destroyed { damage_dealt: i32 },
}

/// Outcome of restoring health to a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthRestored {
    /// Health actually added after capping at max health
    pub amount_restored: i32,
    pub new_health: i32,
}

/// Outcome of awarding experience to a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceAwarded {
    pub amount: i32,
    pub level_up: LevelUp,
}

impl ExperienceAwarded {
    pub fn leveled(&self) -> bool {
        self.level_up.leveled()
    }
}
