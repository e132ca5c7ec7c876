//! Session operation errors.

use warband_domain::{DomainError, GameId, PlayerId};
use warband_shared::ErrorKind;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::transaction::Retryable;

/// Errors that can occur while creating, joining or listing games.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Game not found: {0}")]
    GameNotFound(GameId),
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Username '{0}' is already taken in this game")]
    UsernameTaken(String),
    #[error("Player {player_id} does not belong to game {game_id}")]
    PlayerNotInGame { player_id: PlayerId, game_id: GameId },
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GameNotFound(_) | Self::PlayerNotFound(_) => ErrorKind::NotFound,
            Self::UsernameTaken(_) | Self::PlayerNotInGame { .. } => ErrorKind::Conflict,
            Self::Validation(e) if e.is_input_error() => ErrorKind::InvalidInput,
            Self::Validation(_) => ErrorKind::InvalidState,
            Self::Repo(_) => ErrorKind::Transient,
        }
    }
}

impl Retryable for SessionError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Repo(e) if e.is_conflict())
    }
}
