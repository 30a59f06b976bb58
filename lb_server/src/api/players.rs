//! Player API handlers.
//!
//! ```bash
//! curl -u admin:password123 -X POST http://localhost:8080/players \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "freddy"}'
//! ```

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use leaderboard::player::{
    CreatePlayerRequest, CreatePlayerResponse, PlayerId, RankedPlayer, UpdatePlayerRequest,
};

use super::{AppState, error::ApiError};
use crate::metrics;

/// Count the outcome of an operation and pass the result through
fn track<T>(operation: &'static str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::tournament_operation(operation, outcome);
    result
}

/// Register a new player.
///
/// # Request Body
///
/// ```json
/// { "name": "freddy" }
/// ```
///
/// # Responses
///
/// - `201 Created`: `{"id": "<uuid>"}`
/// - `400 Bad Request`: Empty name or malformed body
/// - `409 Conflict`: Name already registered
pub async fn create_player(
    State(state): State<AppState>,
    payload: Result<Json<CreatePlayerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePlayerResponse>), ApiError> {
    let result = async {
        let Json(request) = payload?;
        request.validate()?;
        let id = state.service.create_player(&request.name).await?;
        Ok::<_, ApiError>((StatusCode::CREATED, Json(CreatePlayerResponse { id })))
    }
    .await;

    track("create_player", result)
}

/// Overwrite a player's score.
///
/// # Request Body
///
/// ```json
/// { "id": "<uuid>", "score": 150 }
/// ```
///
/// # Responses
///
/// - `204 No Content`: Score updated
/// - `400 Bad Request`: Malformed id, negative score or malformed body
/// - `404 Not Found`: No player with that id
pub async fn update_player_score(
    State(state): State<AppState>,
    payload: Result<Json<UpdatePlayerRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let result = async {
        let Json(request) = payload?;
        let (id, score) = request.into_parts()?;
        state.service.update_player_score(id, score).await?;
        Ok::<_, ApiError>(StatusCode::NO_CONTENT)
    }
    .await;

    track("update_score", result)
}

/// Remove every player.
///
/// Always `204 No Content`, even when there was nothing to remove.
pub async fn clear_tournament(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    let result = state
        .service
        .clear_tournament()
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(ApiError::from);

    track("clear_tournament", result)
}

/// List every player ordered by rank.
///
/// Returns `[]` for an empty tournament.
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<RankedPlayer>>, ApiError> {
    let result = state
        .service
        .list_players_by_rank()
        .await
        .map(Json)
        .map_err(ApiError::from);

    track("list_players", result)
}

/// Fetch a single player with their rank.
///
/// # Responses
///
/// - `200 OK`: `{"id", "name", "score", "rank"}`
/// - `400 Bad Request`: Malformed id
/// - `404 Not Found`: No player with that id
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<RankedPlayer>, ApiError> {
    let result = async {
        let id: PlayerId = player_id.parse()?;
        let player = state.service.get_player_by_id(id).await?;
        Ok::<_, ApiError>(Json(player))
    }
    .await;

    track("get_player", result)
}
