use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warband_domain::{Unit, UnitType};

/// Wire shape of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub game_id: Uuid,
    pub player_id: Uuid,
    pub health: i32,
    pub max_health: i32,
    pub level: i32,
    pub experience: i32,
    pub created_at: DateTime<Utc>,
}

impl From<&Unit> for UnitDto {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id().to_uuid(),
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

impl From<Unit> for UnitDto {
    fn from(unit: Unit) -> Self {
        Self::from(&unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warband_domain::{GameId, PlayerId};

    #[test]
    fn unit_type_is_serialized_under_type_key() {
        let unit = Unit::new(UnitType::Wizard, GameId::new(), PlayerId::new(), Utc::now());
        let value = serde_json::to_value(UnitDto::from(&unit)).unwrap();

        assert_eq!(value["type"], "Wizard");
        assert_eq!(value["maxHealth"], 60);
        assert_eq!(value["gameId"], unit.game_id().to_string());
        assert!(value.get("unitType").is_none());
    }
}
