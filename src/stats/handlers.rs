use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::models::{IdentityView, LeaderboardEntry, PlayerStats};
use super::ranking::assign_ranks;
use super::service::DEFAULT_SCAN_WINDOW;
use crate::game::Game;
use crate::shared::{AppError, AppState};

const MAX_SCAN_WINDOW: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Recent-games window used to enumerate identities; identities whose
    /// games all fall outside it are omitted
    pub window: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerGamesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub players: Vec<LeaderboardEntry>,
}

#[derive(Debug, Serialize)]
pub struct PlayerStatsResponse {
    pub identity: IdentityView,
    pub stats: PlayerStats,
}

#[derive(Debug, Serialize)]
pub struct PlayerGamesResponse {
    pub games: Vec<Game>,
}

/// HTTP handler for the leaderboard
///
/// GET /api/players?window=N
/// Returns ranked entries sorted by average score descending
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let window = query
        .window
        .unwrap_or(DEFAULT_SCAN_WINDOW)
        .clamp(1, MAX_SCAN_WINDOW);

    let board = state.stats.leaderboard(window).await?;
    Ok(Json(LeaderboardResponse {
        players: assign_ranks(board),
    }))
}

/// HTTP handler for one player's stats
///
/// GET /api/players/:name
/// The name may be a Discord handle, a registered alias, or any raw name;
/// 404 when the resolved identity has no recorded games
#[instrument(name = "get_player_stats", skip(state))]
pub async fn get_player_stats(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerStatsResponse>, AppError> {
    let stats = state
        .stats
        .stats_for(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No games found for {name}")))?;

    let identity = state.identities.resolve(&name);
    Ok(Json(PlayerStatsResponse {
        identity: IdentityView::from(&identity),
        stats,
    }))
}

/// HTTP handler for one player's game history
///
/// GET /api/players/:name/games?limit=N
/// Deduplicated across the identity's aliases, newest first
#[instrument(name = "get_player_games", skip(state))]
pub async fn get_player_games(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<PlayerGamesQuery>,
) -> Result<Json<PlayerGamesResponse>, AppError> {
    let identity = state.identities.resolve(&name);
    let games = state
        .stats
        .games_for_identity(&identity, query.limit)
        .await?;

    Ok(Json(PlayerGamesResponse { games }))
}
