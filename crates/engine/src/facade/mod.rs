//! Game engine facade.
//!
//! The single entry point for callers that speak strings and envelopes.
//! It parses identifiers, delegates to the use cases and renders every
//! result as an [`Envelope`] of wire DTOs.

mod error;

use std::str::FromStr;
use std::sync::Arc;
use warband_domain::{DomainError, GameId, PlayerId, UnitId};
use warband_shared::{
    AttackResponse, CreatedGame, Envelope, GameSummary, HealResponse, ItemDto, JoinedGame,
    PickupResponse, UnitDto,
};

use crate::app::{EngineOptions, EnginePorts, UseCases};

pub use error::{EngineError, STORE_UNAVAILABLE_MESSAGE};

fn parse_id<T: FromStr<Err = DomainError>>(raw: &str) -> Result<T, EngineError> {
    raw.parse().map_err(EngineError::from)
}

pub struct GameEngine {
    use_cases: Arc<UseCases>,
}

impl GameEngine {
    pub fn new(ports: EnginePorts, options: EngineOptions) -> Self {
        Self::from_use_cases(Arc::new(UseCases::new(ports, options)))
    }

    pub fn from_use_cases(use_cases: Arc<UseCases>) -> Self {
        Self { use_cases }
    }

    /// Typed access for callers that want `Result`s instead of envelopes.
    pub fn use_cases(&self) -> &UseCases {
        &self.use_cases
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    pub async fn create_game(&self, name: &str) -> Envelope<CreatedGame> {
        self.try_create_game(name).await.into()
    }

    async fn try_create_game(&self, name: &str) -> Result<CreatedGame, EngineError> {
        let id = self.use_cases.session.create_game.execute(name).await?;
        Ok(CreatedGame { id: id.to_uuid() })
    }

    pub async fn list_recent_games(&self) -> Envelope<Vec<GameSummary>> {
        self.try_list_recent_games().await.into()
    }

    async fn try_list_recent_games(&self) -> Result<Vec<GameSummary>, EngineError> {
        let games = self.use_cases.session.list_recent_games.execute().await?;
        Ok(games
            .iter()
            .map(|entry| GameSummary::new(&entry.game, &entry.players))
            .collect())
    }

    pub async fn join_game(&self, game_id: &str, username: &str) -> Envelope<JoinedGame> {
        self.try_join_game(game_id, username).await.into()
    }

    async fn try_join_game(&self, game_id: &str, username: &str) -> Result<JoinedGame, EngineError> {
        let game_id: GameId = parse_id(game_id)?;
        let joined = self
            .use_cases
            .session
            .join_game
            .execute(game_id, username)
            .await?;
        Ok(JoinedGame {
            joined: true,
            player_id: joined.player.id().to_uuid(),
            units: joined.units.iter().map(UnitDto::from).collect(),
        })
    }

    pub async fn list_units(&self, game_id: &str, player_id: Option<&str>) -> Envelope<Vec<UnitDto>> {
        self.try_list_units(game_id, player_id).await.into()
    }

    async fn try_list_units(
        &self,
        game_id: &str,
        player_id: Option<&str>,
    ) -> Result<Vec<UnitDto>, EngineError> {
        let game_id: GameId = parse_id(game_id)?;
        let player_id = player_id.map(parse_id::<PlayerId>).transpose()?;
        let units = self
            .use_cases
            .session
            .list_units
            .execute(game_id, player_id)
            .await?;
        Ok(units.into_iter().map(UnitDto::from).collect())
    }

    // =========================================================================
    // Combat
    // =========================================================================

    pub async fn attack(
        &self,
        game_id: &str,
        player_id: &str,
        unit_id: &str,
        target_id: &str,
    ) -> Envelope<AttackResponse> {
        self.try_attack(game_id, player_id, unit_id, target_id)
            .await
            .into()
    }

    async fn try_attack(
        &self,
        game_id: &str,
        player_id: &str,
        unit_id: &str,
        target_id: &str,
    ) -> Result<AttackResponse, EngineError> {
        let outcome = self
            .use_cases
            .combat
            .attack
            .execute(
                parse_id::<GameId>(game_id)?,
                parse_id::<PlayerId>(player_id)?,
                parse_id::<UnitId>(unit_id)?,
                parse_id::<UnitId>(target_id)?,
            )
            .await?;

        if outcome.target_destroyed() {
            Ok(AttackResponse::killed())
        } else {
            Ok(AttackResponse::hit(outcome.damage, outcome.target_new_health))
        }
    }

    pub async fn heal(
        &self,
        game_id: &str,
        player_id: &str,
        unit_id: &str,
        target_id: &str,
    ) -> Envelope<HealResponse> {
        self.try_heal(game_id, player_id, unit_id, target_id)
            .await
            .into()
    }

    async fn try_heal(
        &self,
        game_id: &str,
        player_id: &str,
        unit_id: &str,
        target_id: &str,
    ) -> Result<HealResponse, EngineError> {
        let outcome = self
            .use_cases
            .combat
            .heal
            .execute(
                parse_id::<GameId>(game_id)?,
                parse_id::<PlayerId>(player_id)?,
                parse_id::<UnitId>(unit_id)?,
                parse_id::<UnitId>(target_id)?,
            )
            .await?;
        Ok(HealResponse::new(outcome.healing, outcome.target_new_health))
    }

    // =========================================================================
    // Items
    // =========================================================================

    pub async fn pickup_item(
        &self,
        game_id: &str,
        unit_id: &str,
        item_name: &str,
    ) -> Envelope<PickupResponse> {
        self.try_pickup_item(game_id, unit_id, item_name)
            .await
            .into()
    }

    async fn try_pickup_item(
        &self,
        game_id: &str,
        unit_id: &str,
        item_name: &str,
    ) -> Result<PickupResponse, EngineError> {
        let applied = self
            .use_cases
            .items
            .pickup
            .execute(parse_id(game_id)?, parse_id(unit_id)?, item_name)
            .await?;
        Ok(PickupResponse::new(
            applied.effect,
            applied.amount,
            applied.new_amount,
        ))
    }

    pub fn list_items(&self) -> Envelope<Vec<ItemDto>> {
        let items = self.use_cases.items.list.execute();
        Envelope::ok(items.iter().map(ItemDto::from).collect())
    }
}
