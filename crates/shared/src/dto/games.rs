use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UnitDto;
use warband_domain::{Game, Player};

/// Returned by CreateGame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedGame {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: Uuid,
    pub username: String,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id().to_uuid(),
            username: player.username().to_string(),
        }
    }
}

/// One entry of the recent-games listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub players: Vec<PlayerSummary>,
}

impl GameSummary {
    pub fn new(game: &Game, players: &[Player]) -> Self {
        Self {
            name: game.name().to_string(),
            created_at: game.created_at(),
            players: players.iter().map(PlayerSummary::from).collect(),
        }
    }
}

/// Returned by JoinGame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedGame {
    pub joined: bool,
    pub player_id: Uuid,
    pub units: Vec<UnitDto>,
}
