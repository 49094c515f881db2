use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Score categories on a Wingspan scorecard.
///
/// Nectar and duet tokens only exist on expansion boards; records written
/// before an expansion was tracked simply omit those fields.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum ScoreCategory {
    Birds,
    Bonus,
    EndOfRound,
    Eggs,
    CachedFood,
    TuckedCards,
    Nectar,
    DuetTokens,
}

/// Per-category points for one player in one game.
///
/// The expansion categories default to zero so scorecards recorded before
/// those categories existed still deserialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub birds: u32,
    pub bonus: u32,
    pub end_of_round: u32,
    pub eggs: u32,
    pub cached_food: u32,
    pub tucked_cards: u32,
    #[serde(default)]
    pub nectar: u32,
    #[serde(default)]
    pub duet_tokens: u32,
}

impl ScoreBreakdown {
    pub fn get(&self, category: ScoreCategory) -> u32 {
        match category {
            ScoreCategory::Birds => self.birds,
            ScoreCategory::Bonus => self.bonus,
            ScoreCategory::EndOfRound => self.end_of_round,
            ScoreCategory::Eggs => self.eggs,
            ScoreCategory::CachedFood => self.cached_food,
            ScoreCategory::TuckedCards => self.tucked_cards,
            ScoreCategory::Nectar => self.nectar,
            ScoreCategory::DuetTokens => self.duet_tokens,
        }
    }

    /// Sum of every category
    pub fn total(&self) -> u32 {
        ScoreCategory::iter().map(|category| self.get(category)).sum()
    }
}

/// One player's result within one game, as persisted and served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub id: String,
    pub game_id: String,
    /// Raw name as entered or OCR'd, not a canonical identity
    pub player_name: String,
    /// 1-based seat order
    pub position: u32,
    pub scores: ScoreBreakdown,
    pub total_score: u32,
    pub is_winner: bool,
}

/// An incoming scorecard row, before ids, totals, and winner flags are
/// assigned. This is the shape the OCR service and manual entry produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayerScore {
    pub name: String,
    #[serde(flatten)]
    pub scores: ScoreBreakdown,
}

/// Game metadata as stored in the table's META item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMeta {
    pub id: String,
    pub played_at: NaiveDate,
    pub num_players: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One played session: metadata plus its player rows in seat order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub played_at: NaiveDate,
    pub num_players: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub players: Vec<PlayerScore>,
}

impl Game {
    pub fn from_parts(meta: GameMeta, players: Vec<PlayerScore>) -> Self {
        Self {
            id: meta.id,
            played_at: meta.played_at,
            num_players: meta.num_players,
            uploaded_by: meta.uploaded_by,
            image_url: meta.image_url,
            created_at: meta.created_at,
            players,
        }
    }
}

/// Flags every row whose total equals the maximum total in the game.
/// Ties produce multiple winners, not one.
pub fn mark_winners(rows: &mut [PlayerScore]) {
    let max_total = rows.iter().map(|row| row.total_score).max().unwrap_or(0);
    for row in rows {
        row.is_winner = row.total_score == max_total;
    }
}
