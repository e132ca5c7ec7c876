//! Join game use case.
//!
//! Registers a player in a game and grants the starting roster. The player
//! and its units are one changeset guarded on username uniqueness, so two
//! racing joins under the same name can never both commit.

use std::sync::Arc;
use warband_domain::{GameId, Player, Unit, UnitType, Username};

use crate::infrastructure::ports::ClockPort;
use crate::repositories::{storable_timestamp, Changeset, EntityStore};
use crate::use_cases::transaction::TransactionRetry;

use super::error::SessionError;

/// A freshly joined player and its roster.
#[derive(Debug, Clone)]
pub struct JoinedPlayer {
    pub player: Player,
    pub units: Vec<Unit>,
}

pub struct JoinGame {
    store: Arc<EntityStore>,
    clock: Arc<dyn ClockPort>,
    retry: TransactionRetry,
}

impl JoinGame {
    pub fn new(store: Arc<EntityStore>, clock: Arc<dyn ClockPort>, retry: TransactionRetry) -> Self {
        Self {
            store,
            clock,
            retry,
        }
    }

    /// Join `username` to the game.
    ///
    /// # Errors
    /// * `GameNotFound` - the game does not exist
    /// * `UsernameTaken` - another player already uses this name in the game
    /// * `Validation` - the username is empty or too long
    pub async fn execute(&self, game_id: GameId, username: &str) -> Result<JoinedPlayer, SessionError> {
        let username = Username::new(username)?;
        let joined = self
            .retry
            .run("join_game", || self.try_join(game_id, &username))
            .await?;

        tracing::info!(
            game_id = %game_id,
            player_id = %joined.player.id(),
            username = %joined.player.username(),
            "Player joined game"
        );
        Ok(joined)
    }

    async fn try_join(&self, game_id: GameId, username: &Username) -> Result<JoinedPlayer, SessionError> {
        if self.store.game(game_id).await?.is_none() {
            return Err(SessionError::GameNotFound(game_id));
        }
        if self
            .store
            .player_by_username(game_id, username)
            .await?
            .is_some()
        {
            return Err(SessionError::UsernameTaken(username.to_string()));
        }

        let now = storable_timestamp(self.clock.now());
        let player = Player::new(game_id, username.clone());
        let units: Vec<Unit> = UnitType::ROSTER
            .iter()
            .map(|unit_type| Unit::new(*unit_type, game_id, player.id(), now))
            .collect();

        let mut changes = Changeset::new();
        changes.insert_player(&player)?;
        for unit in &units {
            changes.insert_unit(unit)?;
        }
        self.store.commit(changes).await?;

        Ok(JoinedPlayer { player, units })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::document::InMemoryDocumentStore;
    use crate::test_fixtures::stores::{ContendedStore, YieldingStore};
    use crate::test_fixtures::{fixed_now, TestWorld};
    use crate::use_cases::transaction::RetryConfig;
    use chrono::Duration;
    use warband_shared::ErrorKind;

    fn join_game(world: &TestWorld) -> JoinGame {
        JoinGame::new(
            world.store.clone(),
            world.clock.clone(),
            TransactionRetry::new(RetryConfig::immediate(5)),
        )
    }

    #[tokio::test]
    async fn grants_full_roster_with_fresh_stats() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;

        let joined = join_game(&world).execute(game.id(), "ada").await.unwrap();

        let types: Vec<UnitType> = joined.units.iter().map(|u| u.unit_type()).collect();
        assert_eq!(types, UnitType::ROSTER.to_vec());
        for unit in &joined.units {
            assert_eq!(unit.level(), 1);
            assert_eq!(unit.experience(), 0);
            assert_eq!(unit.health(), unit.max_health());
            assert!(unit.is_owned_by(joined.player.id()));
        }
        assert_eq!(
            world.store.units_of_player(joined.player.id()).await.unwrap(),
            joined.units
        );
    }

    #[tokio::test]
    async fn joined_units_match_later_reads_despite_clock_precision() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;
        let precise = fixed_now() + Duration::nanoseconds(987_654_321);
        let use_case = JoinGame::new(
            world.store.clone(),
            Arc::new(FixedClock(precise)),
            TransactionRetry::new(RetryConfig::immediate(5)),
        );

        let joined = use_case.execute(game.id(), "ada").await.unwrap();

        assert_eq!(joined.units[0].created_at(), fixed_now() + Duration::milliseconds(987));
        assert_eq!(
            world.store.units_of_player(joined.player.id()).await.unwrap(),
            joined.units
        );
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let world = TestWorld::new();

        let err = join_game(&world)
            .execute(GameId::new(), "ada")
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::GameNotFound(_)));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn second_join_with_same_username_conflicts() {
        let world = TestWorld::new();
        let game = world.seed_game("Arena").await;
        let use_case = join_game(&world);

        use_case.execute(game.id(), "ada").await.unwrap();
        let err = use_case.execute(game.id(), "ada").await.unwrap_err();

        assert!(matches!(err, SessionError::UsernameTaken(_)));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn same_username_in_another_game_is_fine() {
        let world = TestWorld::new();
        let first = world.seed_game("One").await;
        let second = world.seed_game("Two").await;
        let use_case = join_game(&world);

        use_case.execute(first.id(), "ada").await.unwrap();
        use_case.execute(second.id(), "ada").await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_joins_with_same_username_admit_exactly_one() {
        let docs = Arc::new(YieldingStore::new(Arc::new(InMemoryDocumentStore::new())));
        let world = TestWorld::with_docs(docs);
        let game = world.seed_game("Arena").await;
        let use_case = join_game(&world);

        let (a, b) = tokio::join!(
            use_case.execute(game.id(), "ada"),
            use_case.execute(game.id(), "ada")
        );

        assert_eq!([a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(), 1);
        let loser = a.err().or(b.err()).unwrap();
        assert_eq!(loser.kind(), ErrorKind::Conflict);
        assert_eq!(world.store.players_in_game(game.id()).await.unwrap().len(), 1);
        assert_eq!(world.store.units_in_game(game.id()).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn persistent_contention_is_transient_after_max_attempts() {
        let setup = TestWorld::new();
        let game = setup.seed_game("Arena").await;
        let contended = Arc::new(ContendedStore::new(setup.docs.clone()));
        let world = TestWorld::with_docs(contended.clone());
        let use_case = JoinGame::new(
            world.store.clone(),
            world.clock.clone(),
            TransactionRetry::new(RetryConfig::immediate(3)),
        );

        let err = use_case.execute(game.id(), "ada").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transient);
        assert_eq!(contended.commit_attempts(), 3);
    }
}
