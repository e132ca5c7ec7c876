//! Game rules: leveling, combat and item effects.
//!
//! Everything here is pure. Randomness comes in as a roll closure and
//! results come back as outcome values for the caller to persist.

pub mod combat;
pub mod items;
pub mod progression;

pub use combat::{
    resolve_attack, resolve_heal, AttackOutcome, AttackedTarget, HealOutcome,
};
pub use items::{apply_item, ItemApplication};
pub use progression::{max_experience, LevelUp, ProgressionState};
