//! Attack use case.

use std::sync::Arc;
use warband_domain::{resolve_attack, AttackOutcome, AttackedTarget, GameId, PlayerId, UnitId};

use crate::infrastructure::ports::RandomPort;
use crate::repositories::{Changeset, EntityStore};
use crate::use_cases::transaction::TransactionRetry;

use super::error::CombatError;
use super::load_engagement;

/// One unit attacks a unit of another player in the same game.
///
/// The attacker's experience (with any level-up) and the target's new health
/// or deletion commit together, guarded by the versions read.
pub struct Attack {
    store: Arc<EntityStore>,
    random: Arc<dyn RandomPort>,
    retry: TransactionRetry,
}

impl Attack {
    pub fn new(store: Arc<EntityStore>, random: Arc<dyn RandomPort>, retry: TransactionRetry) -> Self {
        Self {
            store,
            random,
            retry,
        }
    }

    pub async fn execute(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        unit_id: UnitId,
        target_id: UnitId,
    ) -> Result<AttackOutcome, CombatError> {
        let outcome = self
            .retry
            .run("attack", || {
                self.try_attack(game_id, player_id, unit_id, target_id)
            })
            .await?;

        tracing::info!(
            game_id = %game_id,
            unit_id = %unit_id,
            target_id = %target_id,
            damage = outcome.damage,
            target_new_health = outcome.target_new_health,
            destroyed = outcome.target_destroyed(),
            "Attack resolved"
        );
        Ok(outcome)
    }

    async fn try_attack(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        unit_id: UnitId,
        target_id: UnitId,
    ) -> Result<AttackOutcome, CombatError> {
        let engagement =
            load_engagement(&self.store, game_id, player_id, unit_id, target_id).await?;
        if engagement.target.value.is_owned_by(player_id) {
            return Err(CombatError::SameOwner);
        }

        let outcome = resolve_attack(&engagement.actor.value, &engagement.target.value, |min, max| {
            self.random.gen_range(min, max)
        })?;

        let mut changes = Changeset::new();
        changes.update_unit(&outcome.attacker, engagement.actor.version)?;
        match &outcome.target {
            AttackedTarget::Survived(target) => {
                changes.update_unit(target, engagement.target.version)?;
            }
            AttackedTarget::Destroyed(id) => {
                changes.delete_unit(*id, engagement.target.version);
            }
        }
        self.store.commit(changes).await?;

        Ok(outcome)
    }
}
