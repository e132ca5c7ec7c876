//! HTTP routes.
//!
//! Every body is the envelope JSON; only the status code differs by outcome.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use warband_shared::{
    AttackResponse, CreatedGame, Envelope, ErrorKind, GameSummary, HealResponse, ItemDto,
    JoinedGame, PickupResponse, UnitDto,
};

use crate::app::App;

/// Create all HTTP routes.
///
/// Parameters at the same depth share a name across routes (`/games/{game_id}`
/// carries the new game's name on POST); the router rejects mismatched names.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/games", get(list_games))
        .route("/games/{game_id}", post(create_game))
        .route("/games/{game_id}/units", get(list_game_units))
        .route("/games/{game_id}/players/{player}", post(join_game))
        .route(
            "/games/{game_id}/players/{player}/units",
            get(list_player_units),
        )
        .route(
            "/games/{game_id}/players/{player}/unit/{unit_id}/attack/{target_id}",
            post(attack),
        )
        .route(
            "/games/{game_id}/players/{player}/unit/{unit_id}/heal/{target_id}",
            post(heal),
        )
        .route(
            "/games/{game_id}/unit/{unit_id}/pickup/{item}",
            post(pickup_item),
        )
        .route("/items", get(list_items))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Sessions
// =============================================================================

async fn list_games(State(app): State<Arc<App>>) -> ApiResponse<Vec<GameSummary>> {
    ApiResponse(app.engine.list_recent_games().await)
}

async fn create_game(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> ApiResponse<CreatedGame> {
    ApiResponse(app.engine.create_game(&name).await)
}

async fn join_game(
    State(app): State<Arc<App>>,
    Path((game_id, username)): Path<(String, String)>,
) -> ApiResponse<JoinedGame> {
    ApiResponse(app.engine.join_game(&game_id, &username).await)
}

async fn list_game_units(
    State(app): State<Arc<App>>,
    Path(game_id): Path<String>,
) -> ApiResponse<Vec<UnitDto>> {
    ApiResponse(app.engine.list_units(&game_id, None).await)
}

async fn list_player_units(
    State(app): State<Arc<App>>,
    Path((game_id, player_id)): Path<(String, String)>,
) -> ApiResponse<Vec<UnitDto>> {
    ApiResponse(app.engine.list_units(&game_id, Some(&player_id)).await)
}

// =============================================================================
// Combat
// =============================================================================

async fn attack(
    State(app): State<Arc<App>>,
    Path((game_id, player_id, unit_id, target_id)): Path<(String, String, String, String)>,
) -> ApiResponse<AttackResponse> {
    ApiResponse(
        app.engine
            .attack(&game_id, &player_id, &unit_id, &target_id)
            .await,
    )
}

async fn heal(
    State(app): State<Arc<App>>,
    Path((game_id, player_id, unit_id, target_id)): Path<(String, String, String, String)>,
) -> ApiResponse<HealResponse> {
    ApiResponse(
        app.engine
            .heal(&game_id, &player_id, &unit_id, &target_id)
            .await,
    )
}

// =============================================================================
// Items
// =============================================================================

async fn pickup_item(
    State(app): State<Arc<App>>,
    Path((game_id, unit_id, item)): Path<(String, String, String)>,
) -> ApiResponse<PickupResponse> {
    ApiResponse(app.engine.pickup_item(&game_id, &unit_id, &item).await)
}

async fn list_items(State(app): State<Arc<App>>) -> ApiResponse<Vec<ItemDto>> {
    ApiResponse(app.engine.list_items())
}

// =============================================================================
// Response mapping
// =============================================================================

/// An envelope rendered with the status code its outcome maps to.
#[derive(Debug)]
pub struct ApiResponse<T>(pub Envelope<T>);

pub fn status_for(kind: Option<ErrorKind>) -> StatusCode {
    match kind {
        None => StatusCode::OK,
        Some(ErrorKind::NotFound) => StatusCode::NOT_FOUND,
        Some(ErrorKind::Conflict | ErrorKind::InvalidInput | ErrorKind::InvalidState) => {
            StatusCode::BAD_REQUEST
        }
        Some(ErrorKind::Transient) => StatusCode::SERVICE_UNAVAILABLE,
        Some(ErrorKind::Unknown) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = status_for(self.0.error_kind());
        (status, Json(self.0)).into_response()
    }
}
