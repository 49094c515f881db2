use serde::Serialize;
use std::collections::BTreeMap;

use crate::game::ScoreCategory;
use crate::identity::Identity;

/// Derived statistics for one identity.
///
/// Always recomputed from the identity's full game history, never
/// incrementally updated, so recomputation is idempotent and independent
/// of game insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// Display label: the Discord handle for registered players, the raw
    /// name otherwise
    pub player_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_username: Option<String>,
    /// Raw names this identity's games were recorded under
    pub aliases: Vec<String>,
    pub games_played: u32,
    pub total_wins: u32,
    pub win_rate: f64,
    pub average_score: f64,
    pub high_score: u32,
    pub low_score: u32,
    pub category_averages: BTreeMap<ScoreCategory, f64>,
}

/// A leaderboard row: stats plus a competition rank (tied entries share a
/// rank; the next distinct entry's rank equals its 1-based position)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    #[serde(flatten)]
    pub stats: PlayerStats,
}

/// Identity details served alongside stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_username: Option<String>,
    pub wingspan_names: Vec<String>,
}

impl From<&Identity> for IdentityView {
    fn from(identity: &Identity) -> Self {
        Self {
            discord_username: identity.handle().map(str::to_string),
            wingspan_names: identity
                .alias_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}
