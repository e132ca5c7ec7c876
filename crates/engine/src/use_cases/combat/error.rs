//! Combat operation errors.

use warband_domain::{DomainError, GameId, PlayerId, UnitId, UnitType};
use warband_shared::ErrorKind;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::transaction::Retryable;

/// Errors that can occur during attack and heal.
///
/// Everything except a store failure is an `InvalidState`: the request named
/// entities that cannot take part in this action right now.
#[derive(Debug, thiserror::Error)]
pub enum CombatError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Player {player_id} is not in game {game_id}")]
    PlayerNotInGame { player_id: PlayerId, game_id: GameId },
    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),
    #[error("Target unit {0} not found or already destroyed")]
    TargetNotFound(UnitId),
    #[error("Unit {unit_id} is not in game {game_id}")]
    UnitNotInGame { unit_id: UnitId, game_id: GameId },
    #[error("Unit {unit_id} is not owned by player {player_id}")]
    UnitNotOwned { unit_id: UnitId, player_id: PlayerId },
    #[error("Target unit {target_id} is not in game {game_id}")]
    TargetNotInGame { target_id: UnitId, game_id: GameId },
    #[error("Cannot attack a unit owned by the same player")]
    SameOwner,
    #[error("Only the Wizard can heal, not the {0}")]
    NotAHealer(UnitType),
    #[error("Rule violation: {0}")]
    Rule(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl CombatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Repo(_) => ErrorKind::Transient,
            Self::Rule(e) if e.is_input_error() => ErrorKind::InvalidInput,
            _ => ErrorKind::InvalidState,
        }
    }
}

impl Retryable for CombatError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Repo(e) if e.is_conflict())
    }
}
