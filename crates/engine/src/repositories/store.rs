//! Typed access to games, players and units over the document store.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use warband_domain::{Game, GameId, Player, PlayerId, Unit, UnitId, Username};

use super::records::{
    GameRecord, PlayerRecord, UnitRecord, FIELD_CREATED_AT, FIELD_GAME_ID, FIELD_PLAYER_ID,
    FIELD_USERNAME,
};
use crate::infrastructure::ports::{
    Collection, Document, DocumentStore, Expect, Filter, Guard, RepoError, WriteBatch,
};

/// An aggregate together with the store version it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

fn decode<T: DeserializeOwned>(doc: &Document) -> Result<T, RepoError> {
    serde_json::from_value(doc.body.clone()).map_err(RepoError::serialization)
}

fn encode<T: Serialize>(record: &T) -> Result<Value, RepoError> {
    serde_json::to_value(record).map_err(RepoError::serialization)
}

fn sort_units(units: &mut [Unit]) {
    units.sort_by_key(|u| (u.created_at(), u.unit_type().roster_position(), u.id()));
}

// =============================================================================
// Entity Store
// =============================================================================

/// Entity store adapter.
///
/// Reads return domain aggregates; writes go through a [`Changeset`] so one
/// operation's writes land atomically.
pub struct EntityStore {
    store: Arc<dyn DocumentStore>,
}

impl EntityStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // Games
    // =========================================================================

    pub async fn game(&self, id: GameId) -> Result<Option<Game>, RepoError> {
        let Some(doc) = self.store.get(Collection::Games, id.to_uuid()).await? else {
            return Ok(None);
        };
        decode::<GameRecord>(&doc)?.into_domain(doc.id).map(Some)
    }

    /// Games created strictly after `since`, newest first.
    pub async fn games_created_after(&self, since: DateTime<Utc>) -> Result<Vec<Game>, RepoError> {
        let docs = self
            .store
            .query(
                Collection::Games,
                vec![Filter::gt(FIELD_CREATED_AT, since.timestamp_millis())],
            )
            .await?;

        let mut games = docs
            .iter()
            .map(|doc| decode::<GameRecord>(doc)?.into_domain(doc.id))
            .collect::<Result<Vec<_>, _>>()?;
        games.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(games)
    }

    // =========================================================================
    // Players
    // =========================================================================

    pub async fn player(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        let Some(doc) = self.store.get(Collection::Players, id.to_uuid()).await? else {
            return Ok(None);
        };
        decode::<PlayerRecord>(&doc)?.into_domain(doc.id).map(Some)
    }

    /// Players of one game, ordered by username.
    pub async fn players_in_game(&self, game_id: GameId) -> Result<Vec<Player>, RepoError> {
        let docs = self
            .store
            .query(
                Collection::Players,
                vec![Filter::eq(FIELD_GAME_ID, game_id.to_string())],
            )
            .await?;

        let mut players = docs
            .iter()
            .map(|doc| decode::<PlayerRecord>(doc)?.into_domain(doc.id))
            .collect::<Result<Vec<_>, _>>()?;
        players.sort_by(|a, b| {
            a.username()
                .as_str()
                .cmp(b.username().as_str())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(players)
    }

    pub async fn player_by_username(
        &self,
        game_id: GameId,
        username: &Username,
    ) -> Result<Option<Player>, RepoError> {
        let docs = self
            .store
            .query(Collection::Players, username_filters(game_id, username))
            .await?;
        docs.first()
            .map(|doc| decode::<PlayerRecord>(doc)?.into_domain(doc.id))
            .transpose()
    }

    // =========================================================================
    // Units
    // =========================================================================

    pub async fn unit(&self, id: UnitId) -> Result<Option<Versioned<Unit>>, RepoError> {
        let Some(doc) = self.store.get(Collection::Units, id.to_uuid()).await? else {
            return Ok(None);
        };
        let value = decode::<UnitRecord>(&doc)?.into_domain(doc.id)?;
        Ok(Some(Versioned {
            value,
            version: doc.version,
        }))
    }

    /// Units owned by one player, ordered by creation time then roster order.
    pub async fn units_of_player(&self, player_id: PlayerId) -> Result<Vec<Unit>, RepoError> {
        self.units_where(Filter::eq(FIELD_PLAYER_ID, player_id.to_string()))
            .await
    }

    /// Units of every player in one game, ordered like [`Self::units_of_player`].
    pub async fn units_in_game(&self, game_id: GameId) -> Result<Vec<Unit>, RepoError> {
        self.units_where(Filter::eq(FIELD_GAME_ID, game_id.to_string()))
            .await
    }

    async fn units_where(&self, filter: Filter) -> Result<Vec<Unit>, RepoError> {
        let docs = self.store.query(Collection::Units, vec![filter]).await?;
        let mut units = docs
            .iter()
            .map(|doc| decode::<UnitRecord>(doc)?.into_domain(doc.id))
            .collect::<Result<Vec<_>, _>>()?;
        sort_units(&mut units);
        Ok(units)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    pub async fn commit(&self, changeset: Changeset) -> Result<(), RepoError> {
        if changeset.is_empty() {
            return Ok(());
        }
        self.store.commit(changeset.batch).await
    }
}

fn username_filters(game_id: GameId, username: &Username) -> Vec<Filter> {
    vec![
        Filter::eq(FIELD_GAME_ID, game_id.to_string()),
        Filter::eq(FIELD_USERNAME, username.as_str()),
    ]
}

// =============================================================================
// Changeset
// =============================================================================

/// The guarded writes of one operation, committed all together or not at all.
#[derive(Debug, Default)]
pub struct Changeset {
    batch: WriteBatch,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn insert_game(&mut self, game: &Game) -> Result<&mut Self, RepoError> {
        let body = encode(&GameRecord::from(game))?;
        self.batch
            .put(Collection::Games, game.id().to_uuid(), body, Expect::Absent);
        Ok(self)
    }

    /// Insert a player, guarded so the commit fails if the username is
    /// already taken in that game.
    pub fn insert_player(&mut self, player: &Player) -> Result<&mut Self, RepoError> {
        let body = encode(&PlayerRecord::from(player))?;
        self.batch
            .guard(Guard::NoneMatch {
                collection: Collection::Players,
                filters: username_filters(player.game_id(), player.username()),
            })
            .put(
                Collection::Players,
                player.id().to_uuid(),
                body,
                Expect::Absent,
            );
        Ok(self)
    }

    pub fn insert_unit(&mut self, unit: &Unit) -> Result<&mut Self, RepoError> {
        let body = encode(&UnitRecord::from(unit))?;
        self.batch
            .put(Collection::Units, unit.id().to_uuid(), body, Expect::Absent);
        Ok(self)
    }

    /// Overwrite a unit read at `version`.
    pub fn update_unit(&mut self, unit: &Unit, version: u64) -> Result<&mut Self, RepoError> {
        let body = encode(&UnitRecord::from(unit))?;
        self.batch.put(
            Collection::Units,
            unit.id().to_uuid(),
            body,
            Expect::Version(version),
        );
        Ok(self)
    }

    /// Remove a destroyed unit read at `version`.
    pub fn delete_unit(&mut self, id: UnitId, version: u64) -> &mut Self {
        self.batch.delete(Collection::Units, id.to_uuid(), version);
        self
    }

    #[cfg(test)]
    pub(crate) fn batch(&self) -> &WriteBatch {
        &self.batch
    }
}
