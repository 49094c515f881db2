use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use futures::future::try_join_all;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

use super::models::PlayerStats;
use crate::game::{Game, GameError, GameRepository, PlayerScore, ScoreCategory};
use crate::identity::{Identity, IdentityResolver};

/// Default number of recent games scanned to enumerate leaderboard
/// identities. See [`StatsService::leaderboard`] for the trade-off.
pub const DEFAULT_SCAN_WINDOW: usize = 200;

/// Computes per-identity statistics and the leaderboard by querying the
/// game repository through the identity resolver.
///
/// Everything here is derived: stats are recomputed from the full game
/// history on every call, so results are idempotent and independent of
/// the order games were recorded in.
pub struct StatsService {
    games: Arc<GameRepository>,
    resolver: Arc<IdentityResolver>,
}

impl StatsService {
    pub fn new(games: Arc<GameRepository>, resolver: Arc<IdentityResolver>) -> Self {
        Self { games, resolver }
    }

    /// Deduplicated game history for an identity, newest play date first.
    ///
    /// Registered identities union the name-index lookups of every alias;
    /// a Standalone identity degenerates to a single lookup.
    #[instrument(skip(self, identity), fields(identity = %identity.display_name()))]
    pub async fn games_for_identity(
        &self,
        identity: &Identity,
        limit: Option<usize>,
    ) -> Result<Vec<Game>, GameError> {
        let lookups = identity
            .alias_names()
            .into_iter()
            .map(|alias| self.games.games_by_raw_name(alias, limit));
        let per_alias = try_join_all(lookups).await?;

        let mut seen = HashSet::new();
        let mut games: Vec<Game> = per_alias
            .into_iter()
            .flatten()
            .filter(|game| seen.insert(game.id.clone()))
            .collect();
        games.sort_by(|a, b| (b.played_at, b.created_at).cmp(&(a.played_at, a.created_at)));
        if let Some(limit) = limit {
            games.truncate(limit);
        }

        debug!(count = games.len(), "Games for identity fetched");
        Ok(games)
    }

    /// Stats for whatever `raw_name_or_handle` resolves to, or None when
    /// that identity has no recorded games. Repository failures propagate
    /// unchanged.
    #[instrument(skip(self))]
    pub async fn stats_for(
        &self,
        raw_name_or_handle: &str,
    ) -> Result<Option<PlayerStats>, GameError> {
        let identity = self.resolver.resolve(raw_name_or_handle);
        let games = self.games_for_identity(&identity, None).await?;
        Ok(compute_stats(&identity, &games))
    }

    /// All identities observed in the `scan_window` most recent games,
    /// with full-history stats each, sorted by average score descending.
    ///
    /// Identity enumeration only scans that bounded window: an identity
    /// whose games all fall outside it is omitted. Callers needing
    /// completeness must widen the window explicitly.
    #[instrument(skip(self))]
    pub async fn leaderboard(&self, scan_window: usize) -> Result<Vec<PlayerStats>, GameError> {
        let recent = self.games.recent_games(scan_window).await?;

        let mut seen = HashSet::new();
        let mut identities = Vec::new();
        for game in &recent {
            for row in &game.players {
                let identity = self.resolver.resolve(&row.player_name);
                if seen.insert(identity.dedupe_key()) {
                    identities.push(identity);
                }
            }
        }

        let mut board = Vec::new();
        for identity in &identities {
            let games = self.games_for_identity(identity, None).await?;
            if let Some(stats) = compute_stats(identity, &games) {
                board.push(stats);
            }
        }
        board.sort_by(|a, b| {
            b.average_score
                .partial_cmp(&a.average_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            scan_window,
            identities = identities.len(),
            entries = board.len(),
            "Leaderboard computed"
        );
        Ok(board)
    }
}

/// Aggregates one identity's game history. Returns None when no game has a
/// row matching any of the identity's aliases.
fn compute_stats(identity: &Identity, games: &[Game]) -> Option<PlayerStats> {
    let rows: Vec<&PlayerScore> = games
        .iter()
        .filter_map(|game| {
            game.players
                .iter()
                .find(|row| identity.matches(&row.player_name))
        })
        .collect();

    if rows.is_empty() {
        return None;
    }
    let games_played = rows.len() as u32;

    let total_wins = rows.iter().filter(|row| row.is_winner).count() as u32;
    let score_sum: u32 = rows.iter().map(|row| row.total_score).sum();
    let high_score = rows.iter().map(|row| row.total_score).max().unwrap_or(0);
    let low_score = rows.iter().map(|row| row.total_score).min().unwrap_or(0);

    let mut category_averages = BTreeMap::new();
    for category in ScoreCategory::iter() {
        let sum: u32 = rows.iter().map(|row| row.scores.get(category)).sum();
        category_averages.insert(category, f64::from(sum) / f64::from(games_played));
    }

    Some(PlayerStats {
        player_name: identity.display_name().to_string(),
        discord_username: identity.handle().map(str::to_string),
        aliases: identity
            .alias_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        games_played,
        total_wins,
        win_rate: f64::from(total_wins) / f64::from(games_played),
        average_score: f64::from(score_sum) / f64::from(games_played),
        high_score,
        low_score,
        category_averages,
    })
}
