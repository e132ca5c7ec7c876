//! List units use case.

use std::sync::Arc;
use warband_domain::{GameId, PlayerId, Unit};

use crate::repositories::EntityStore;

use super::error::SessionError;

/// Lists the live units of one player, or of every player in a game.
pub struct ListUnits {
    store: Arc<EntityStore>,
}

impl ListUnits {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    /// With `player_id`, the player must exist and belong to `game_id`.
    /// Without it, the game must exist.
    pub async fn execute(
        &self,
        game_id: GameId,
        player_id: Option<PlayerId>,
    ) -> Result<Vec<Unit>, SessionError> {
        let units = match player_id {
            Some(player_id) => {
                let player = self
                    .store
                    .player(player_id)
                    .await?
                    .ok_or(SessionError::PlayerNotFound(player_id))?;
                if !player.is_in_game(game_id) {
                    return Err(SessionError::PlayerNotInGame { player_id, game_id });
                }
                self.store.units_of_player(player_id).await?
            }
            None => {
                if self.store.game(game_id).await?.is_none() {
                    return Err(SessionError::GameNotFound(game_id));
                }
                self.store.units_in_game(game_id).await?
            }
        };

        tracing::debug!(game_id = %game_id, player_id = ?player_id, count = units.len(), "Listed units");
        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::TestWorld;
    use warband_shared::ErrorKind;

    #[tokio::test]
    async fn lists_one_players_roster() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;
        let (ada, roster) = world.seed_player(&game, "ada").await;
        world.seed_player(&game, "bob").await;

        let units = ListUnits::new(world.store.clone())
            .execute(game.id(), Some(ada.id()))
            .await
            .unwrap();

        assert_eq!(units, roster);
    }

    #[tokio::test]
    async fn lists_every_player_in_the_game() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;
        let other = world.seed_game("Elsewhere").await;
        world.seed_player(&game, "ada").await;
        world.seed_player(&game, "bob").await;
        world.seed_player(&other, "cy").await;

        let units = ListUnits::new(world.store.clone())
            .execute(game.id(), None)
            .await
            .unwrap();

        assert_eq!(units.len(), 10);
        assert!(units.iter().all(|u| u.is_in_game(game.id())));
    }

    #[tokio::test]
    async fn destroyed_units_are_absent() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;
        let (ada, roster) = world.seed_player(&game, "ada").await;
        let victim = roster[0].id();
        let version = world.store.unit(victim).await.unwrap().unwrap().version;
        let mut changes = crate::repositories::Changeset::new();
        changes.delete_unit(victim, version);
        world.store.commit(changes).await.unwrap();

        let units = ListUnits::new(world.store.clone())
            .execute(game.id(), Some(ada.id()))
            .await
            .unwrap();

        assert_eq!(units.len(), 4);
        assert!(units.iter().all(|u| u.id() != victim));
    }

    #[tokio::test]
    async fn unknown_player_is_not_found() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;

        let err = ListUnits::new(world.store.clone())
            .execute(game.id(), Some(PlayerId::new()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn player_from_another_game_conflicts() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;
        let other = world.seed_game("Elsewhere").await;
        let (stranger, _) = world.seed_player(&other, "cy").await;

        let err = ListUnits::new(world.store.clone())
            .execute(game.id(), Some(stranger.id()))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::PlayerNotInGame { .. }));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let world = TestWorld::new();

        let err = ListUnits::new(world.store.clone())
            .execute(GameId::new(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::GameNotFound(_)));
    }
}
