//! Player aggregate - a username taking part in one game

use crate::ids::{GameId, PlayerId};
use crate::value_objects::Username;

/// A player in a game. Units reference the player by id; they are not
/// embedded here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    username: Username,
    game_id: GameId,
}

impl Player {
    pub fn new(game_id: GameId, username: Username) -> Self {
        Self {
            id: PlayerId::new(),
            username,
            game_id,
        }
    }

    /// Rebuild a player loaded from storage.
    pub fn restore(id: PlayerId, game_id: GameId, username: Username) -> Self {
        Self {
            id,
            username,
            game_id,
        }
    }

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[inline]
    pub fn username(&self) -> &Username {
        &self.username
    }

    #[inline]
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn is_in_game(&self, game_id: GameId) -> bool {
        self.game_id == game_id
    }
}
