//! Pickup item use case.
//!
//! Applies a catalog item's effect to a unit. The catalog is consulted
//! before anything is read, so an unknown item never touches the store.

use std::sync::Arc;
use warband_domain::{apply_item, GameId, ItemApplication, ItemCatalog, ItemDefinition, UnitId};

use crate::repositories::{Changeset, EntityStore};
use crate::use_cases::transaction::TransactionRetry;

use super::error::ItemError;

pub struct PickupItem {
    store: Arc<EntityStore>,
    catalog: Arc<ItemCatalog>,
    retry: TransactionRetry,
}

impl PickupItem {
    pub fn new(store: Arc<EntityStore>, catalog: Arc<ItemCatalog>, retry: TransactionRetry) -> Self {
        Self {
            store,
            catalog,
            retry,
        }
    }

    /// Execute the pickup item use case.
    ///
    /// # Returns
    /// * `Ok(ItemApplication)` - the effect landed and was stored
    /// * `Err(ItemError)` - unknown item, missing unit, or store failure
    pub async fn execute(
        &self,
        game_id: GameId,
        unit_id: UnitId,
        item_name: &str,
    ) -> Result<ItemApplication, ItemError> {
        let item = self
            .catalog
            .get(item_name)
            .ok_or_else(|| ItemError::UnknownItem(item_name.to_string()))?;

        let applied = self
            .retry
            .run("pickup_item", || self.try_pickup(game_id, unit_id, item))
            .await?;

        tracing::info!(
            game_id = %game_id,
            unit_id = %unit_id,
            item = item.name(),
            effect = %applied.effect,
            amount = applied.amount,
            new_amount = applied.new_amount,
            "Item picked up"
        );
        Ok(applied)
    }

    async fn try_pickup(
        &self,
        game_id: GameId,
        unit_id: UnitId,
        item: &ItemDefinition,
    ) -> Result<ItemApplication, ItemError> {
        let unit = self
            .store
            .unit(unit_id)
            .await?
            .ok_or(ItemError::UnitNotFound(unit_id))?;
        if !unit.value.is_in_game(game_id) {
            return Err(ItemError::UnitNotInGame { unit_id, game_id });
        }

        let applied = apply_item(&unit.value, item);

        let mut changes = Changeset::new();
        changes.update_unit(&applied.unit, unit.version)?;
        self.store.commit(changes).await?;

        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockDocumentStore;
    use crate::test_fixtures::{unit_of, TestWorld};
    use crate::use_cases::transaction::RetryConfig;
    use warband_domain::{ItemEffect, UnitType};
    use warband_shared::ErrorKind;

    fn pickup(world: &TestWorld) -> PickupItem {
        PickupItem::new(
            world.store.clone(),
            Arc::new(ItemCatalog::builtin()),
            TransactionRetry::new(RetryConfig::immediate(5)),
        )
    }

    #[tokio::test]
    async fn health_item_heals_up_to_max() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;
        let (_, units) = world.seed_player(&game, "ada").await;
        let archer = unit_of(&units, UnitType::Archer);
        world
            .update_unit(archer.id(), |u| {
                u.apply_damage(10);
            })
            .await;

        let applied = pickup(&world)
            .execute(game.id(), archer.id(), "potion")
            .await
            .unwrap();

        assert_eq!(applied.effect, ItemEffect::Health);
        assert_eq!(applied.amount, 10);
        assert_eq!(applied.new_amount, 80);
        assert_eq!(world.unit(archer.id()).await.unwrap().health(), 80);
    }

    #[tokio::test]
    async fn experience_item_levels_the_unit() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;
        let (_, units) = world.seed_player(&game, "ada").await;
        let knight = unit_of(&units, UnitType::Knight);

        let applied = pickup(&world)
            .execute(game.id(), knight.id(), "Tome")
            .await
            .unwrap();

        assert_eq!(applied.effect, ItemEffect::Experience);
        assert_eq!(applied.amount, 30);
        assert_eq!(applied.new_amount, 10);
        let stored = world.unit(knight.id()).await.unwrap();
        assert_eq!(stored.level(), 2);
        assert_eq!(stored.experience(), 10);
    }

    #[tokio::test]
    async fn unknown_item_never_touches_the_store() {
        let mut docs = MockDocumentStore::new();
        docs.expect_get().never();
        docs.expect_commit().never();
        let world = TestWorld::with_docs(Arc::new(docs));

        let err = pickup(&world)
            .execute(GameId::new(), UnitId::new(), "excalibur")
            .await
            .unwrap_err();

        assert!(matches!(err, ItemError::UnknownItem(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn unit_from_another_game_is_invalid_state() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;
        let other = world.seed_game("Elsewhere").await;
        let (_, units) = world.seed_player(&other, "cy").await;

        let err = pickup(&world)
            .execute(game.id(), units[0].id(), "potion")
            .await
            .unwrap_err();

        assert!(matches!(err, ItemError::UnitNotInGame { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(world.unit(units[0].id()).await.unwrap(), units[0]);
    }

    #[tokio::test]
    async fn missing_unit_is_invalid_state() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;

        let err = pickup(&world)
            .execute(game.id(), UnitId::new(), "scroll")
            .await
            .unwrap_err();

        assert!(matches!(err, ItemError::UnitNotFound(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn catalog_amount_is_not_consumed() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;
        let (_, units) = world.seed_player(&game, "ada").await;
        let use_case = pickup(&world);

        let first = use_case.execute(game.id(), units[0].id(), "potion").await.unwrap();
        let second = use_case.execute(game.id(), units[0].id(), "potion").await.unwrap();

        assert_eq!(first.amount, 0);
        assert_eq!(second.amount, 0);
        assert_eq!(use_case.catalog.get("potion").unwrap().amount(), 20);
    }
}
