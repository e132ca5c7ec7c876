//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Exposes behavior through methods, not public fields
//! - Returns domain events from mutations
//!
//! Games, players and units are separate roots linked by id, because each
//! side is queried on its own (units of a player, players of a game).

pub mod game;
pub mod player;
pub mod unit;

pub use game::Game;
pub use player::Player;
pub use unit::Unit;
