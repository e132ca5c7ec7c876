use serde::{Deserialize, Serialize};

use warband_domain::ItemEffect;

pub const ATTACK_SUCCESS_MESSAGE: &str = "Attack was successful";
pub const KILL_MESSAGE: &str =
    "Target unit has been killed and the attacker was awarded 15 experience.";
pub const HEAL_SUCCESS_MESSAGE: &str = "Healing was successful";
pub const PICKUP_SUCCESS_MESSAGE: &str = "Item was picked up successfully";

/// Attack result. A kill is reported as a bare message string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttackResponse {
    #[serde(rename_all = "camelCase")]
    Hit {
        message: String,
        dealt_damage: i32,
        target_new_health: i32,
    },
    Killed(String),
}

impl AttackResponse {
    pub fn hit(dealt_damage: i32, target_new_health: i32) -> Self {
        AttackResponse::Hit {
            message: ATTACK_SUCCESS_MESSAGE.to_string(),
            dealt_damage,
            target_new_health,
        }
    }

    pub fn killed() -> Self {
        AttackResponse::Killed(KILL_MESSAGE.to_string())
    }

    pub fn is_kill(&self) -> bool {
        matches!(self, AttackResponse::Killed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealResponse {
    pub message: String,
    pub healed_amount: i32,
    pub target_new_health: i32,
}

impl HealResponse {
    pub fn new(healed_amount: i32, target_new_health: i32) -> Self {
        Self {
            message: HEAL_SUCCESS_MESSAGE.to_string(),
            healed_amount,
            target_new_health,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupResponse {
    pub message: String,
    pub effect: ItemEffect,
    pub amount: i32,
    pub new_amount: i32,
}

impl PickupResponse {
    pub fn new(effect: ItemEffect, amount: i32, new_amount: i32) -> Self {
        Self {
            message: PICKUP_SUCCESS_MESSAGE.to_string(),
            effect,
            amount,
            new_amount,
        }
    }
}
