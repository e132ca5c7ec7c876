//! Warband Shared - wire types for the game engine
//!
//! This crate contains everything a caller of the engine sees:
//! - The result envelope (`{ok, data}` / `{ok, errorKind, message}`)
//! - Response DTOs for games, units, combat and items
//!
//! # Design Principles
//!
//! 1. **No business logic** - Pure data types and serialization
//! 2. **No domain IDs** - raw `uuid::Uuid` in DTOs
//! 3. **camelCase on the wire** - field names match the stored documents

pub mod dto;
pub mod responses;

pub use dto::{
    AttackResponse, CreatedGame, GameSummary, HealResponse, ItemDto, JoinedGame, PickupResponse,
    PlayerSummary, UnitDto, ATTACK_SUCCESS_MESSAGE, HEAL_SUCCESS_MESSAGE, KILL_MESSAGE,
    PICKUP_SUCCESS_MESSAGE,
};
pub use responses::{Envelope, ErrorKind};
