//! Combat use cases: unit-versus-unit attack and Wizard heal.
//!
//! Both share the same preconditions, checked by [`load_engagement`] against
//! fresh snapshots on every transaction attempt.

mod attack;
mod error;
mod heal;

use std::sync::Arc;
use warband_domain::{GameId, PlayerId, Unit, UnitId};

use crate::repositories::{EntityStore, Versioned};

pub use attack::Attack;
pub use error::CombatError;
pub use heal::Heal;

/// Container for combat use cases.
pub struct CombatUseCases {
    pub attack: Arc<Attack>,
    pub heal: Arc<Heal>,
}

impl CombatUseCases {
    pub fn new(attack: Arc<Attack>, heal: Arc<Heal>) -> Self {
        Self { attack, heal }
    }
}

/// One combat request's parties, as read from the store.
#[derive(Debug, Clone)]
pub(crate) struct Engagement {
    pub actor: Versioned<Unit>,
    /// Same snapshot as `actor` when a unit targets itself
    pub target: Versioned<Unit>,
}

impl Engagement {
    pub fn is_self_targeted(&self) -> bool {
        self.actor.value.id() == self.target.value.id()
    }
}

/// Load and validate the acting player, acting unit and target.
pub(crate) async fn load_engagement(
    store: &EntityStore,
    game_id: GameId,
    player_id: PlayerId,
    unit_id: UnitId,
    target_id: UnitId,
) -> Result<Engagement, CombatError> {
    let player = store
        .player(player_id)
        .await?
        .ok_or(CombatError::PlayerNotFound(player_id))?;
    if !player.is_in_game(game_id) {
        return Err(CombatError::PlayerNotInGame { player_id, game_id });
    }

    let actor = store
        .unit(unit_id)
        .await?
        .ok_or(CombatError::UnitNotFound(unit_id))?;
    if !actor.value.is_in_game(game_id) {
        return Err(CombatError::UnitNotInGame { unit_id, game_id });
    }
    if !actor.value.is_owned_by(player_id) {
        return Err(CombatError::UnitNotOwned { unit_id, player_id });
    }

    let target = if target_id == unit_id {
        actor.clone()
    } else {
        store
            .unit(target_id)
            .await?
            .ok_or(CombatError::TargetNotFound(target_id))?
    };
    if !target.value.is_in_game(game_id) {
        return Err(CombatError::TargetNotInGame { target_id, game_id });
    }

    Ok(Engagement { actor, target })
}
