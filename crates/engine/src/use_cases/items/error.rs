//! Item operation errors.

use warband_domain::{GameId, UnitId};
use warband_shared::ErrorKind;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::transaction::Retryable;

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),
    #[error("Unit {unit_id} is not in game {game_id}")]
    UnitNotInGame { unit_id: UnitId, game_id: GameId },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl ItemError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownItem(_) => ErrorKind::InvalidInput,
            Self::UnitNotFound(_) | Self::UnitNotInGame { .. } => ErrorKind::InvalidState,
            Self::Repo(_) => ErrorKind::Transient,
        }
    }
}

impl Retryable for ItemError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Repo(e) if e.is_conflict())
    }
}
