//! Response DTOs.
//!
//! Every type here is a plain data carrier with camelCase field names. Ids
//! are raw UUIDs and timestamps are RFC 3339 strings on the wire.

mod actions;
mod games;
mod items;
mod units;

pub use actions::{
    AttackResponse, HealResponse, PickupResponse, ATTACK_SUCCESS_MESSAGE, HEAL_SUCCESS_MESSAGE,
    KILL_MESSAGE, PICKUP_SUCCESS_MESSAGE,
};
pub use games::{CreatedGame, GameSummary, JoinedGame, PlayerSummary};
pub use items::ItemDto;
pub use units::UnitDto;
