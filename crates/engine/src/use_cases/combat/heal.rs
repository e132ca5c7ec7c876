//! Heal use case.

use std::sync::Arc;
use warband_domain::{resolve_heal, GameId, HealOutcome, PlayerId, UnitId};

use crate::infrastructure::ports::RandomPort;
use crate::repositories::{Changeset, EntityStore};
use crate::use_cases::transaction::TransactionRetry;

use super::error::CombatError;
use super::load_engagement;

/// A Wizard restores health to any unit in its game, itself included.
pub struct Heal {
    store: Arc<EntityStore>,
    random: Arc<dyn RandomPort>,
    retry: TransactionRetry,
}

impl Heal {
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
    ) -> Result<HealOutcome, CombatError> {
        let outcome = self
            .retry
            .run("heal", || self.try_heal(game_id, player_id, unit_id, target_id))
            .await?;

        tracing::info!(
            game_id = %game_id,
            unit_id = %unit_id,
            target_id = %target_id,
            healing = outcome.healing,
            target_new_health = outcome.target_new_health,
            "Heal resolved"
        );
        Ok(outcome)
    }

    async fn try_heal(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        unit_id: UnitId,
        target_id: UnitId,
    ) -> Result<HealOutcome, CombatError> {
        let engagement =
            load_engagement(&self.store, game_id, player_id, unit_id, target_id).await?;
        let healer_type = engagement.actor.value.unit_type();
        if !healer_type.can_heal() {
            return Err(CombatError::NotAHealer(healer_type));
        }

        let outcome = resolve_heal(&engagement.actor.value, &engagement.target.value, |min, max| {
            self.random.gen_range(min, max)
        })?;

        let mut changes = Changeset::new();
        changes.update_unit(&outcome.healer, engagement.actor.version)?;
        if !engagement.is_self_targeted() {
            changes.update_unit(&outcome.target, engagement.target.version)?;
        }
        self.store.commit(changes).await?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::ports::MockRandomPort;
    use crate::test_fixtures::{unit_of, TestWorld};
    use crate::use_cases::transaction::RetryConfig;
    use mockall::predicate::eq;
    use warband_domain::{Game, Player, Unit, UnitType};
    use warband_shared::ErrorKind;

    fn heal(world: &TestWorld, random: impl RandomPort + 'static) -> Heal {
        Heal::new(
            world.store.clone(),
            Arc::new(random),
            TransactionRetry::new(RetryConfig::immediate(5)),
        )
    }

    async fn party(world: &TestWorld) -> (Game, Player, Vec<Unit>) {
        let game = world.seed_game("Arena").await;
        let (ada, units) = world.seed_player(&game, "ada").await;
        (game, ada, units)
    }

    #[tokio::test]
    async fn restores_health_and_rewards_healer() {
        let world = TestWorld::new();
        let (game, ada, units) = party(&world).await;
        let wizard = unit_of(&units, UnitType::Wizard);
        let knight = unit_of(&units, UnitType::Knight);
        world
            .update_unit(knight.id(), |u| {
                u.apply_damage(40);
            })
            .await;

        let mut random = MockRandomPort::new();
        random
            .expect_gen_range()
            .with(eq(0), eq(10))
            .times(1)
            .returning(|_, _| 3);

        let outcome = heal(&world, random)
            .execute(game.id(), ada.id(), wizard.id(), knight.id())
            .await
            .unwrap();

        assert_eq!(outcome.healing, 18);
        assert_eq!(outcome.target_new_health, 98);
        assert_eq!(world.unit(knight.id()).await.unwrap().health(), 98);
        assert_eq!(world.unit(wizard.id()).await.unwrap().experience(), 10);
    }

    #[tokio::test]
    async fn healing_is_capped_at_max_health() {
        let world = TestWorld::new();
        let (game, ada, units) = party(&world).await;
        let wizard = unit_of(&units, UnitType::Wizard);
        let soldier = unit_of(&units, UnitType::Soldier);
        world
            .update_unit(soldier.id(), |u| {
                u.apply_damage(5);
            })
            .await;

        let outcome = heal(&world, FixedRandom(10))
            .execute(game.id(), ada.id(), wizard.id(), soldier.id())
            .await
            .unwrap();

        assert_eq!(outcome.healing, 5);
        assert_eq!(outcome.target_new_health, 100);
    }

    #[tokio::test]
    async fn may_heal_another_players_unit() {
        let world = TestWorld::new();
        let (game, ada, units) = party(&world).await;
        let (_, bob_units) = world.seed_player(&game, "bob").await;
        let wizard = unit_of(&units, UnitType::Wizard);
        let zombie = unit_of(&bob_units, UnitType::Zombie);
        world
            .update_unit(zombie.id(), |u| {
                u.apply_damage(30);
            })
            .await;

        let outcome = heal(&world, FixedRandom(0))
            .execute(game.id(), ada.id(), wizard.id(), zombie.id())
            .await
            .unwrap();

        assert_eq!(outcome.target_new_health, 75);
    }

    #[tokio::test]
    async fn self_heal_writes_the_unit_once() {
        let world = TestWorld::new();
        let (game, ada, units) = party(&world).await;
        let wizard = unit_of(&units, UnitType::Wizard);
        world
            .update_unit(wizard.id(), |u| {
                u.apply_damage(30);
            })
            .await;

        let outcome = heal(&world, FixedRandom(0))
            .execute(game.id(), ada.id(), wizard.id(), wizard.id())
            .await
            .unwrap();

        assert!(outcome.is_self_heal());
        let stored = world.store.unit(wizard.id()).await.unwrap().unwrap();
        assert_eq!(stored.version, 3);
        assert_eq!(stored.value.health(), 45);
        assert_eq!(stored.value.experience(), 10);
    }

    #[tokio::test]
    async fn only_wizards_heal() {
        let world = TestWorld::new();
        let (game, ada, units) = party(&world).await;
        let soldier = unit_of(&units, UnitType::Soldier);
        let knight = unit_of(&units, UnitType::Knight);

        let err = heal(&world, FixedRandom(0))
            .execute(game.id(), ada.id(), soldier.id(), knight.id())
            .await
            .unwrap_err();

        assert!(matches!(err, CombatError::NotAHealer(UnitType::Soldier)));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(world.unit(soldier.id()).await.unwrap(), soldier);
    }

    #[tokio::test]
    async fn destroyed_target_cannot_be_healed() {
        let world = TestWorld::new();
        let (game, ada, units) = party(&world).await;
        let wizard = unit_of(&units, UnitType::Wizard);

        let err = heal(&world, FixedRandom(0))
            .execute(game.id(), ada.id(), wizard.id(), UnitId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CombatError::TargetNotFound(_)));
    }
}
