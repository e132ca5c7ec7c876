//! List recent games use case.

use chrono::Duration;
use std::sync::Arc;
use warband_domain::{Game, Player};

use crate::infrastructure::ports::ClockPort;
use crate::repositories::EntityStore;

use super::error::SessionError;

/// Default look-back window for [`ListRecentGames`].
pub const DEFAULT_RECENT_WINDOW_HOURS: i64 = 24;

/// A game with the players currently in it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameWithPlayers {
    pub game: Game,
    pub players: Vec<Player>,
}

/// Lists games created within a trailing window, newest first.
///
/// Players are fetched with one `gameId`-scoped query per game.
pub struct ListRecentGames {
    store: Arc<EntityStore>,
    clock: Arc<dyn ClockPort>,
    window: Duration,
}

impl ListRecentGames {
    pub fn new(store: Arc<EntityStore>, clock: Arc<dyn ClockPort>, window: Duration) -> Self {
        Self {
            store,
            clock,
            window,
        }
    }

    pub async fn execute(&self) -> Result<Vec<GameWithPlayers>, SessionError> {
        let since = self.clock.now() - self.window;
        let games = self.store.games_created_after(since).await?;

        let mut listed = Vec::with_capacity(games.len());
        for game in games {
            let players = self.store.players_in_game(game.id()).await?;
            listed.push(GameWithPlayers { game, players });
        }

        tracing::debug!(since = %since, count = listed.len(), "Listed recent games");
        Ok(listed)
    }
}
