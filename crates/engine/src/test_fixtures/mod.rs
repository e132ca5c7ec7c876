//! Common test helpers: a seeded in-memory world and store wrappers that
//! force interleavings or contention.
//!
//! # Usage
//!
//! ```rust,ignore
//! let world = TestWorld::new();
//! let game = world.seed_game("Arena").await;
//! let (player, units) = world.seed_player(&game, "ada").await;
//! ```

pub mod stores;

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use warband_domain::{Game, GameName, Player, Unit, UnitId, UnitType, Username};

use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::document::InMemoryDocumentStore;
use crate::infrastructure::ports::{ClockPort, DocumentStore};
use crate::repositories::{Changeset, EntityStore};

/// 2024-06-01T12:00:00Z
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// The roster unit of the given type.
///
/// # Panics
///
/// Panics if `units` has no unit of that type.
pub fn unit_of(units: &[Unit], unit_type: UnitType) -> Unit {
    units
        .iter()
        .find(|u| u.unit_type() == unit_type)
        .cloned()
        .unwrap_or_else(|| panic!("no {} in roster", unit_type))
}

/// A document store plus typed helpers for arranging test state.
pub struct TestWorld {
    pub docs: Arc<dyn DocumentStore>,
    pub store: Arc<EntityStore>,
    pub clock: Arc<dyn ClockPort>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::with_docs(Arc::new(InMemoryDocumentStore::new()))
    }

    pub fn with_docs(docs: Arc<dyn DocumentStore>) -> Self {
        Self {
            store: Arc::new(EntityStore::new(docs.clone())),
            docs,
            clock: Arc::new(FixedClock(fixed_now())),
        }
    }

    pub async fn seed_game(&self, name: &str) -> Game {
        self.seed_game_at(name, fixed_now()).await
    }

    pub async fn seed_game_at(&self, name: &str, created_at: DateTime<Utc>) -> Game {
        let game = Game::new(GameName::new(name).unwrap(), created_at);
        let mut changes = Changeset::new();
        changes.insert_game(&game).unwrap();
        self.store.commit(changes).await.unwrap();
        game
    }

    /// Join `username` to `game` with the full roster.
    pub async fn seed_player(&self, game: &Game, username: &str) -> (Player, Vec<Unit>) {
        let player = Player::new(game.id(), Username::new(username).unwrap());
        let units: Vec<Unit> = UnitType::ROSTER
            .iter()
            .map(|ty| Unit::new(*ty, game.id(), player.id(), fixed_now()))
            .collect();

        let mut changes = Changeset::new();
        changes.insert_player(&player).unwrap();
        for unit in &units {
            changes.insert_unit(unit).unwrap();
        }
        self.store.commit(changes).await.unwrap();
        (player, units)
    }

    /// Current state of a unit, or `None` once destroyed.
    pub async fn unit(&self, id: UnitId) -> Option<Unit> {
        self.store.unit(id).await.unwrap().map(|v| v.value)
    }

    /// Apply `f` to a stored unit and write it back.
    pub async fn update_unit(&self, id: UnitId, f: impl FnOnce(&mut Unit)) -> Unit {
        let mut current = self.store.unit(id).await.unwrap().expect("unit exists");
        f(&mut current.value);
        let mut changes = Changeset::new();
        changes.update_unit(&current.value, current.version).unwrap();
        self.store.commit(changes).await.unwrap();
        current.value
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}
