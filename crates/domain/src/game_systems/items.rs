//! Applying catalog items to units.

use crate::aggregates::Unit;
use crate::game_systems::progression::LevelUp;
use crate::value_objects::{ItemDefinition, ItemEffect};

/// What picking up one item did to a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemApplication {
    /// Unit after the effect (and any level-up)
    pub unit: Unit,
    pub effect: ItemEffect,
    /// Effective amount: capped for health, the catalog amount for experience
    pub amount: i32,
    /// Health or experience after applying the item
    pub new_amount: i32,
    /// Set when an experience item pushed the unit over a threshold
    pub level_up: Option<LevelUp>,
}

/// Apply `item` to a copy of `unit`.
///
/// The catalog entry is only read; every application computes its own
/// effective amount.
pub fn apply_item(unit: &Unit, item: &ItemDefinition) -> ItemApplication {
    let mut unit = unit.clone();
    match item.effect() {
        ItemEffect::Health => {
            let restored = unit.restore_health(item.amount());
            ItemApplication {
                unit,
                effect: ItemEffect::Health,
                amount: restored.amount_restored,
                new_amount: restored.new_health,
                level_up: None,
            }
        }
        ItemEffect::Experience => {
            let award = unit.award_experience(item.amount());
            let new_amount = unit.experience();
            ItemApplication {
                unit,
                effect: ItemEffect::Experience,
                amount: item.amount(),
                new_amount,
                level_up: award.leveled().then_some(award.level_up),
            }
        }
    }
}
