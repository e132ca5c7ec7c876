//! Attack and heal resolution.
//!
//! Resolvers take unit snapshots and a roll source and return an outcome
//! describing the new state of every unit involved. They never persist
//! anything; the engine writes the outcome back.
//!
//! The roll source is `FnMut(min, max) -> i32` over an inclusive range. A
//! roll outside the requested range is clamped back into it.

use crate::aggregates::Unit;
use crate::error::DomainError;
use crate::events::{DamageOutcome, ExperienceAwarded};
use crate::ids::UnitId;

/// Number of distinct random damage values added on top of strength.
pub const ATTACK_SPREAD: i32 = 15;
/// Experience for a hit that leaves the target alive.
pub const HIT_EXPERIENCE: i32 = 5;
/// Experience for destroying the target.
pub const KILL_EXPERIENCE: i32 = 15;

/// Minimum healing per heal action.
pub const HEAL_BASE: i32 = 15;
/// Number of distinct random healing values added on top of the base.
pub const HEAL_SPREAD: i32 = 11;
/// Experience a healer earns per heal, even on a full-health target.
pub const HEAL_EXPERIENCE: i32 = 10;

fn roll_between(roll: &mut impl FnMut(i32, i32) -> i32, min: i32, max: i32) -> i32 {
    roll(min, max).clamp(min, max)
}

// =============================================================================
// Attack
// =============================================================================

/// What remains of the target after an attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackedTarget {
    /// Target survived with reduced health
    Survived(Unit),
    /// Target's health reached zero; it must be deleted
    Destroyed(UnitId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Attacker after its experience award (and any level-up)
    pub attacker: Unit,
    pub target: AttackedTarget,
    pub damage: i32,
    /// Target health after the hit; zero or negative when destroyed
    pub target_new_health: i32,
    pub experience: ExperienceAwarded,
}

impl AttackOutcome {
    pub fn target_destroyed(&self) -> bool {
        matches!(self.target, AttackedTarget::Destroyed(_))
    }
}

/// Check the unit-to-unit rules for an attack.
pub fn ensure_can_attack(attacker: &Unit, target: &Unit) -> Result<(), DomainError> {
    if attacker.game_id() != target.game_id() {
        return Err(DomainError::constraint(
            "Attacker and target are not in the same game",
        ));
    }
    if attacker.player_id() == target.player_id() {
        return Err(DomainError::constraint(
            "Attacker and target are owned by the same player",
        ));
    }
    Ok(())
}

/// Resolve one attack.
///
/// `damage = roll(0, 14) + strength(attacker)`. A target brought to zero or
/// below is destroyed and the attacker earns [`KILL_EXPERIENCE`]; otherwise
/// the attacker earns [`HIT_EXPERIENCE`].
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use warband_domain::game_systems::combat::resolve_attack;
/// use warband_domain::{GameId, PlayerId, Unit, UnitType};
///
/// let game = GameId::new();
/// let soldier = Unit::new(UnitType::Soldier, game, PlayerId::new(), Utc::now());
/// let knight = Unit::new(UnitType::Knight, game, PlayerId::new(), Utc::now());
///
/// let outcome = resolve_attack(&soldier, &knight, |_, _| 4).unwrap();
/// assert_eq!(outcome.damage, 24);
/// assert_eq!(outcome.target_new_health, 96);
/// assert_eq!(outcome.attacker.experience(), 5);
/// ```
pub fn resolve_attack(
    attacker: &Unit,
    target: &Unit,
    mut roll: impl FnMut(i32, i32) -> i32,
) -> Result<AttackOutcome, DomainError> {
    ensure_can_attack(attacker, target)?;

    let damage = roll_between(&mut roll, 0, ATTACK_SPREAD - 1) + attacker.unit_type().strength();

    let mut target = target.clone();
    let (target, target_new_health, reward) = match target.apply_damage(damage) {
        DamageOutcome::Destroyed { .. } => {
            let health = target.health();
            (AttackedTarget::Destroyed(target.id()), health, KILL_EXPERIENCE)
        }
        DamageOutcome::Wounded {
            remaining_health, ..
        } => (AttackedTarget::Survived(target), remaining_health, HIT_EXPERIENCE),
    };

    let mut attacker = attacker.clone();
    let experience = attacker.award_experience(reward);

    Ok(AttackOutcome {
        attacker,
        target,
        damage,
        target_new_health,
        experience,
    })
}

// =============================================================================
// Heal
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealOutcome {
    /// Healer after its experience award (and any level-up)
    pub healer: Unit,
    /// Target after healing. For a self-heal this is the same unit as
    /// `healer` and carries the same final state.
    pub target: Unit,
    /// Health actually added, after capping at the target's max health
    pub healing: i32,
    pub target_new_health: i32,
    pub experience: ExperienceAwarded,
}

impl HealOutcome {
    pub fn is_self_heal(&self) -> bool {
        self.healer.id() == self.target.id()
    }
}

/// Check the unit-to-unit rules for a heal.
pub fn ensure_can_heal(healer: &Unit, target: &Unit) -> Result<(), DomainError> {
    if healer.game_id() != target.game_id() {
        return Err(DomainError::constraint(
            "Healer and target are not in the same game",
        ));
    }
    if !healer.unit_type().can_heal() {
        return Err(DomainError::constraint("Only the Wizard can heal"));
    }
    Ok(())
}

/// Resolve one heal.
///
/// `healing = roll(0, 10) + 15`, capped so the target never exceeds its max
/// health; the reported healing is the amount actually applied. The healer
/// always earns [`HEAL_EXPERIENCE`].
pub fn resolve_heal(
    healer: &Unit,
    target: &Unit,
    mut roll: impl FnMut(i32, i32) -> i32,
) -> Result<HealOutcome, DomainError> {
    ensure_can_heal(healer, target)?;

    let rolled = roll_between(&mut roll, 0, HEAL_SPREAD - 1) + HEAL_BASE;

    let mut target = target.clone();
    let restored = target.restore_health(rolled);

    if target.id() == healer.id() {
        // Healing lands first, the experience award sees the healed health.
        let experience = target.award_experience(HEAL_EXPERIENCE);
        return Ok(HealOutcome {
            healer: target.clone(),
            target,
            healing: restored.amount_restored,
            target_new_health: restored.new_health,
            experience,
        });
    }

    let mut healer = healer.clone();
    let experience = healer.award_experience(HEAL_EXPERIENCE);

    Ok(HealOutcome {
        healer,
        target,
        healing: restored.amount_restored,
        target_new_health: restored.new_health,
        experience,
    })
}
