// Library crate for the WingStats score-tracking service
// This file exposes the public API for integration tests

pub mod game;
pub mod identity;
pub mod shared;
pub mod stats;
pub mod storage;

// Re-export commonly used types for easier access in tests
pub use game::{Game, GameError, GameRepository, NewPlayerScore, PlayerScore, ScoreBreakdown};
pub use identity::{Identity, IdentityConfig, IdentityResolver};
pub use shared::{AppError, AppState};
pub use stats::{assign_ranks, LeaderboardEntry, PlayerStats, StatsService};
pub use storage::{InMemoryTableStore, TableStore};

use axum::routing::get;
use axum::Router;

/// Builds the API router. Middleware layers (tracing, CORS) are applied by
/// the binary so tests can drive the bare routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/games",
            axum::routing::post(game::handlers::create_game).get(game::handlers::list_recent_games),
        )
        .route(
            "/api/games/:id",
            get(game::handlers::get_game)
                .put(game::handlers::update_game)
                .delete(game::handlers::delete_game),
        )
        .route("/api/players", get(stats::handlers::get_leaderboard))
        .route("/api/players/:name", get(stats::handlers::get_player_stats))
        .route(
            "/api/players/:name/games",
            get(stats::handlers::get_player_games),
        )
        .with_state(state)
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "healthy" }))
}
