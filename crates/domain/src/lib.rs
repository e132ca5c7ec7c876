//! Warband domain model.
//!
//! Pure types and rules for games, players and units. Nothing in this crate
//! performs I/O; the engine crate loads aggregates, calls into
//! [`game_systems`] and persists the outcomes.

pub mod aggregates;
pub mod error;
pub mod events;
pub mod game_systems;
pub mod ids;
pub mod value_objects;

pub use aggregates::{Game, Player, Unit};
pub use error::DomainError;
pub use events::{DamageOutcome, ExperienceAwarded, HealthRestored};
pub use game_systems::{
    apply_item, max_experience, resolve_attack, resolve_heal, AttackOutcome, AttackedTarget,
    HealOutcome, ItemApplication, LevelUp, ProgressionState,
};
pub use ids::{GameId, PlayerId, UnitId};
pub use value_objects::{GameName, ItemCatalog, ItemDefinition, ItemEffect, UnitType, Username};
