use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::game::{GameError, GameRepository};
use crate::identity::IdentityResolver;
use crate::stats::StatsService;
use crate::storage::TableStore;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<GameRepository>,
    pub stats: Arc<StatsService>,
    pub identities: Arc<IdentityResolver>,
}

impl AppState {
    pub fn new(store: Arc<dyn TableStore>, identities: Arc<IdentityResolver>) -> Self {
        let games = Arc::new(GameRepository::new(store));
        let stats = Arc::new(StatsService::new(Arc::clone(&games), Arc::clone(&identities)));
        Self {
            games,
            stats,
            identities,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::Validation(msg) => AppError::Validation(msg),
            GameError::Storage(err) => AppError::Storage(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Storage(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Storage error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
