use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::models::{Game, NewPlayerScore};

/// Request body for creating a game from parsed scorecard rows
///
/// This is the shape the upload flow posts after the OCR service has
/// extracted rows from a screenshot (or after manual entry).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub played_at: NaiveDate,
    pub players: Vec<NewPlayerScore>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Request body for a full replace of a game's date and player rows
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameRequest {
    pub played_at: NaiveDate,
    pub players: Vec<NewPlayerScore>,
}

#[derive(Debug, Deserialize)]
pub struct RecentGamesQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub game: Game,
}

#[derive(Debug, Serialize)]
pub struct GamesResponse {
    pub games: Vec<Game>,
}
