use super::models::{LeaderboardEntry, PlayerStats};

/// Assigns competition ranks to a leaderboard already sorted by average
/// score descending: an entry's rank is its 1-based position unless its
/// score ties the immediately preceding entry, in which case it inherits
/// that entry's rank (1, 1, 3 — not 1, 1, 2).
pub fn assign_ranks(board: Vec<PlayerStats>) -> Vec<LeaderboardEntry> {
    let mut entries = Vec::with_capacity(board.len());
    let mut prev_score: Option<f64> = None;
    let mut rank = 0;

    for (index, stats) in board.into_iter().enumerate() {
        if prev_score != Some(stats.average_score) {
            rank = index as u32 + 1;
        }
        prev_score = Some(stats.average_score);
        entries.push(LeaderboardEntry { rank, stats });
    }

    entries
}
