//! Create game use case.

use std::sync::Arc;
use warband_domain::{Game, GameId, GameName};

use crate::infrastructure::ports::ClockPort;
use crate::repositories::{storable_timestamp, Changeset, EntityStore};

use super::error::SessionError;

/// Creates a new, empty game stamped with the server clock.
pub struct CreateGame {
    store: Arc<EntityStore>,
    clock: Arc<dyn ClockPort>,
}

impl CreateGame {
    pub fn new(store: Arc<EntityStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    /// Names need not be unique; only emptiness and length are checked.
    pub async fn execute(&self, name: &str) -> Result<GameId, SessionError> {
        let name = GameName::new(name)?;
        let game = Game::new(name, storable_timestamp(self.clock.now()));

        let mut changes = Changeset::new();
        changes.insert_game(&game)?;
        self.store.commit(changes).await?;

        tracing::info!(game_id = %game.id(), name = %game.name(), "Game created");
        Ok(game.id())
    }
}
