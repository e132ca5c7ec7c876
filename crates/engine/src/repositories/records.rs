//! Stored document layouts.
//!
//! Field names are camelCase and timestamps are epoch milliseconds so the
//! store can compare them numerically.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warband_domain::{
    Game, GameId, GameName, Player, PlayerId, ProgressionState, Unit, UnitId, UnitType, Username,
};

use crate::infrastructure::ports::RepoError;

pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_GAME_ID: &str = "gameId";
pub const FIELD_PLAYER_ID: &str = "playerId";
pub const FIELD_USERNAME: &str = "username";

/// `at` at the millisecond precision documents keep. Stamp new aggregates
/// with this so what a caller gets back matches what later reads return.
pub fn storable_timestamp(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(3)
}

fn corrupt(entity: &str, id: Uuid, e: impl std::fmt::Display) -> RepoError {
    RepoError::serialization(format!("{} {} is corrupt: {}", entity, id, e))
}

// =============================================================================
// Game
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl From<&Game> for GameRecord {
    fn from(game: &Game) -> Self {
        Self {
            name: game.name().to_string(),
            created_at: game.created_at(),
        }
    }
}

impl GameRecord {
    pub fn into_domain(self, id: Uuid) -> Result<Game, RepoError> {
        let name = GameName::new(self.name).map_err(|e| corrupt("Game", id, e))?;
        Ok(Game::restore(GameId::from_uuid(id), name, self.created_at))
    }
}

// =============================================================================
// Player
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub username: String,
    pub game_id: Uuid,
}

impl From<&Player> for PlayerRecord {
    fn from(player: &Player) -> Self {
        Self {
            username: player.username().to_string(),
            game_id: player.game_id().to_uuid(),
        }
    }
}

impl PlayerRecord {
    pub fn into_domain(self, id: Uuid) -> Result<Player, RepoError> {
        let username = Username::new(self.username).map_err(|e| corrupt("Player", id, e))?;
        Ok(Player::restore(
            PlayerId::from_uuid(id),
            GameId::from_uuid(self.game_id),
            username,
        ))
    }
}

// =============================================================================
// Unit
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRecord {
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub health: i32,
    pub max_health: i32,
    pub level: i32,
    pub experience: i32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl From<&Unit> for UnitRecord {
    fn from(unit: &Unit) -> Self {
        Self {
            unit_type: unit.unit_type(),
            game_id: unit.game_id().to_uuid(),
            player_id: unit.player_id().to_uuid(),
            health: unit.health(),
            max_health: unit.max_health(),
            level: unit.level(),
            experience: unit.experience(),
            created_at: unit.created_at(),
        }
    }
}

impl UnitRecord {
    pub fn into_domain(self, id: Uuid) -> Result<Unit, RepoError> {
        Unit::restore(
            UnitId::from_uuid(id),
            self.unit_type,
            GameId::from_uuid(self.game_id),
            PlayerId::from_uuid(self.player_id),
            ProgressionState::new(self.level, self.experience, self.health, self.max_health),
            self.created_at,
        )
        .map_err(|e| corrupt("Unit", id, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn unit_layout_matches_stored_documents() {
        let created = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let unit = Unit::new(UnitType::Knight, GameId::new(), PlayerId::new(), created);

        let body = serde_json::to_value(UnitRecord::from(&unit)).unwrap();

        assert_eq!(
            body,
            json!({
                "type": "Knight",
                "gameId": unit.game_id().to_string(),
                "playerId": unit.player_id().to_string(),
                "health": 120,
                "maxHealth": 120,
                "level": 1,
                "experience": 0,
                "createdAt": 1_700_000_000_123i64,
            })
        );
    }

    #[test]
    fn storable_timestamp_survives_the_stored_layout() {
        let precise = Utc.timestamp_nanos(1_700_000_000_123_456_789);
        let stamped = storable_timestamp(precise);
        let game = Game::new(GameName::new("Arena").unwrap(), stamped);

        let body = serde_json::to_value(GameRecord::from(&game)).unwrap();
        let restored: GameRecord = serde_json::from_value(body).unwrap();

        assert_eq!(stamped.timestamp_millis(), 1_700_000_000_123);
        assert_eq!(restored.created_at, stamped);
    }

    #[test]
    fn impossible_unit_stats_are_reported_as_corrupt() {
        let record: UnitRecord = serde_json::from_value(json!({
            "type": "Archer",
            "gameId": Uuid::new_v4(),
            "playerId": Uuid::new_v4(),
            "health": 90,
            "maxHealth": 80,
            "level": 1,
            "experience": 0,
            "createdAt": 0,
        }))
        .unwrap();

        let err = record.into_domain(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, RepoError::Serialization(_)));
    }
}
