//! Unit aggregate - a combat-capable piece owned by a player
//!
//! # Invariants
//!
//! - `0 <= health <= max_health` for every live unit
//! - `level >= 1`
//! - `0 <= experience < max_experience(level)`
//!
//! A unit whose health drops to zero or below is destroyed: the engine
//! deletes it instead of storing the non-positive health.

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::events::{DamageOutcome, ExperienceAwarded, HealthRestored};
use crate::game_systems::progression::{max_experience, ProgressionState};
use crate::ids::{GameId, PlayerId, UnitId};
use crate::value_objects::UnitType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    // Identity
    id: UnitId,
    unit_type: UnitType,
    game_id: GameId,
    player_id: PlayerId,

    // Combat state
    health: i32,
    max_health: i32,
    level: i32,
    experience: i32,

    created_at: DateTime<Utc>,
}

impl Unit {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a fresh level-1 unit at full health for its type.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::Utc;
    /// use warband_domain::{GameId, PlayerId, Unit, UnitType};
    ///
    /// let unit = Unit::new(UnitType::Knight, GameId::new(), PlayerId::new(), Utc::now());
    /// assert_eq!(unit.health(), 120);
    /// assert_eq!(unit.max_health(), 120);
    /// assert_eq!(unit.level(), 1);
    /// assert_eq!(unit.experience(), 0);
    /// ```
    pub fn new(unit_type: UnitType, game_id: GameId, player_id: PlayerId, now: DateTime<Utc>) -> Self {
        let max_health = unit_type.base_max_health();
        Self {
            id: UnitId::new(),
            unit_type,
            game_id,
            player_id,
            health: max_health,
            max_health,
            level: 1,
            experience: 0,
            created_at: now,
        }
    }

    /// Rebuild a unit loaded from storage, checking the stat invariants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the stored stats are impossible
    /// for a live unit.
    pub fn restore(
        id: UnitId,
        unit_type: UnitType,
        game_id: GameId,
        player_id: PlayerId,
        stats: ProgressionState,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if stats.level < 1 {
            return Err(DomainError::validation(format!("Unit {} has level {}", id, stats.level)));
        }
        if stats.experience < 0 || stats.experience >= max_experience(stats.level) {
            return Err(DomainError::validation(format!(
                "Unit {} has experience {} at level {}",
                id, stats.experience, stats.level
            )));
        }
        if stats.max_health <= 0 || stats.health < 0 || stats.health > stats.max_health {
            return Err(DomainError::validation(format!(
                "Unit {} has health {}/{}",
                id, stats.health, stats.max_health
            )));
        }

        Ok(Self {
            id,
            unit_type,
            game_id,
            player_id,
            health: stats.health,
            max_health: stats.max_health,
            level: stats.level,
            experience: stats.experience,
            created_at,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> UnitId {
        self.id
    }

    #[inline]
    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    #[inline]
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    #[inline]
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    #[inline]
    pub fn level(&self) -> i32 {
        self.level
    }

    #[inline]
    pub fn experience(&self) -> i32 {
        self.experience
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn stats(&self) -> ProgressionState {
        ProgressionState::new(self.level, self.experience, self.health, self.max_health)
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    pub fn is_in_game(&self, game_id: GameId) -> bool {
        self.game_id == game_id
    }

    pub fn is_owned_by(&self, player_id: PlayerId) -> bool {
        self.player_id == player_id
    }

    // =========================================================================
    // Mutation Methods (return domain events)
    // =========================================================================

    /// Subtract `amount` health.
    ///
    /// A `Destroyed` outcome leaves the non-positive health in place; the
    /// caller is expected to delete the unit rather than persist it.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        self.health = self.health.saturating_sub(amount);
        if self.health <= 0 {
            DamageOutcome::Destroyed {
                damage_dealt: amount,
            }
        } else {
            DamageOutcome::Wounded {
                damage_dealt: amount,
                remaining_health: self.health,
            }
        }
    }

    /// Add up to `amount` health, capped at max health.
    pub fn restore_health(&mut self, amount: i32) -> HealthRestored {
        let new_health = self.health.saturating_add(amount.max(0)).min(self.max_health);
        let amount_restored = new_health - self.health;
        self.health = new_health;
        HealthRestored {
            amount_restored,
            new_health,
        }
    }

    /// Add experience and immediately apply any level-ups it unlocks.
    pub fn award_experience(&mut self, amount: i32) -> ExperienceAwarded {
        let mut stats = self.stats();
        stats.experience = stats.experience.saturating_add(amount.max(0));
        let level_up = stats.level_up();

        self.level = level_up.after.level;
        self.experience = level_up.after.experience;
        self.health = level_up.after.health;
        self.max_health = level_up.after.max_health;

        ExperienceAwarded { amount, level_up }
    }
}
