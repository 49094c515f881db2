use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use super::types::{
    CreateGameRequest, GameResponse, GamesResponse, RecentGamesQuery, UpdateGameRequest,
};
use crate::shared::{AppError, AppState};

const DEFAULT_RECENT_LIMIT: usize = 10;
const MAX_RECENT_LIMIT: usize = 100;

/// HTTP handler for recording a new game
///
/// POST /api/games
/// Accepts parsed scorecard rows, returns the materialized game with
/// generated ids, computed totals, and winner flags
#[instrument(name = "create_game", skip(state, request))]
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameResponse>), AppError> {
    info!(num_players = request.players.len(), "Creating new game");

    let game = state
        .games
        .create_game(
            request.played_at,
            &request.players,
            request.uploaded_by,
            request.image_url,
        )
        .await?;

    info!(game_id = %game.id, "Game recorded");
    Ok((StatusCode::CREATED, Json(GameResponse { game })))
}

/// HTTP handler for listing recent games
///
/// GET /api/games?limit=N
/// Returns games newest play date first; limit defaults to 10
#[instrument(name = "list_recent_games", skip(state))]
pub async fn list_recent_games(
    State(state): State<AppState>,
    Query(query): Query<RecentGamesQuery>,
) -> Result<Json<GamesResponse>, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);

    let games = state.games.recent_games(limit).await?;
    Ok(Json(GamesResponse { games }))
}

/// HTTP handler for fetching a single game
///
/// GET /api/games/:id
#[instrument(name = "get_game", skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, AppError> {
    let game = state
        .games
        .get_game(&game_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Game {game_id} not found")))?;

    Ok(Json(GameResponse { game }))
}

/// HTTP handler for replacing a game's date and player rows
///
/// PUT /api/games/:id
#[instrument(name = "update_game", skip(state, request))]
pub async fn update_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<UpdateGameRequest>,
) -> Result<Json<GameResponse>, AppError> {
    let game = state
        .games
        .update_game(&game_id, request.played_at, &request.players)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Game {game_id} not found")))?;

    Ok(Json(GameResponse { game }))
}

/// HTTP handler for deleting a game
///
/// DELETE /api/games/:id
#[instrument(name = "delete_game", skip(state))]
pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let removed = state.games.delete_game(&game_id).await?;
    if !removed {
        return Err(AppError::NotFound(format!("Game {game_id} not found")));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app() -> Router {
        let app_state = AppStateBuilder::new().build();
        Router::new()
            .route(
                "/api/games",
                axum::routing::post(create_game).get(list_recent_games),
            )
            .route(
                "/api/games/:id",
                axum::routing::get(get_game)
                    .put(update_game)
                    .delete(delete_game),
            )
            .with_state(app_state)
    }

    fn post_games(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/games")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const VALID_BODY: &str = r#"{
        "playedAt": "2026-03-01",
        "players": [
            {"name": "Alice", "birds": 45, "bonus": 15, "endOfRound": 10,
             "eggs": 18, "cachedFood": 4, "tuckedCards": 8},
            {"name": "Bob", "birds": 38, "bonus": 12, "endOfRound": 8,
             "eggs": 14, "cachedFood": 6, "tuckedCards": 5}
        ]
    }"#;

    #[tokio::test]
    async fn test_create_game_handler() {
        let response = app().oneshot(post_games(VALID_BODY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let game = &json["game"];
        assert!(!game["id"].as_str().unwrap().is_empty());
        assert_eq!(game["numPlayers"], 2);
        assert_eq!(game["players"][0]["totalScore"], 100);
        assert_eq!(game["players"][0]["isWinner"], true);
        assert_eq!(game["players"][1]["totalScore"], 83);
        assert_eq!(game["players"][1]["isWinner"], false);
    }

    #[tokio::test]
    async fn test_create_game_handler_empty_players_is_bad_request() {
        let body = r#"{"playedAt": "2026-03-01", "players": []}"#;
        let response = app().oneshot(post_games(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_game_handler_malformed_json() {
        let response = app()
            .oneshot(post_games(r#"{"playedAt": "2026-03-01""#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_game_handler_unknown_id_is_not_found() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/games/no-such-game")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_game_handler_unknown_id_is_not_found() {
        let request = Request::builder()
            .method("PUT")
            .uri("/api/games/no-such-game")
            .header("content-type", "application/json")
            .body(Body::from(VALID_BODY.to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_game_handler_unknown_id_is_not_found() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/games/no-such-game")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
