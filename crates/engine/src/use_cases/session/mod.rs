//! Game session use cases: creating, listing and joining games, and listing
//! the units in them.

mod create_game;
mod error;
mod join_game;
mod list_games;
mod list_units;

use std::sync::Arc;

pub use create_game::CreateGame;
pub use error::SessionError;
pub use join_game::{JoinGame, JoinedPlayer};
pub use list_games::{GameWithPlayers, ListRecentGames, DEFAULT_RECENT_WINDOW_HOURS};
pub use list_units::ListUnits;

/// Container for session use cases.
pub struct SessionUseCases {
    pub create_game: Arc<CreateGame>,
    pub join_game: Arc<JoinGame>,
    pub list_recent_games: Arc<ListRecentGames>,
    pub list_units: Arc<ListUnits>,
}

impl SessionUseCases {
    pub fn new(
        create_game: Arc<CreateGame>,
        join_game: Arc<JoinGame>,
        list_recent_games: Arc<ListRecentGames>,
        list_units: Arc<ListUnits>,
    ) -> Self {
        Self {
            create_game,
            join_game,
            list_recent_games,
            list_units,
        }
    }
}
