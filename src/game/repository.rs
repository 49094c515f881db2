use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::models::{mark_winners, Game, GameMeta, NewPlayerScore, PlayerScore};
use crate::storage::{StorageError, StoredItem, TableStore};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

const META_SORT: &str = "META";
const PLAYER_SORT_PREFIX: &str = "PLAYER#";

fn game_partition(game_id: &str) -> String {
    format!("GAME#{game_id}")
}

fn player_sort(position: u32) -> String {
    format!("{PLAYER_SORT_PREFIX}{position:03}")
}

/// Create/read/update/delete of game records against the storage
/// collaborator. One metadata item plus one item per player row; the
/// repository owns the key scheme and the winner/total computation.
pub struct GameRepository {
    store: Arc<dyn TableStore>,
}

impl GameRepository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Persists a new game. Totals are computed per row, every row whose
    /// total equals the game maximum is flagged a winner, and positions are
    /// assigned 1-based in input order.
    #[instrument(skip(self, rows))]
    pub async fn create_game(
        &self,
        played_at: NaiveDate,
        rows: &[NewPlayerScore],
        uploaded_by: Option<String>,
        image_url: Option<String>,
    ) -> Result<Game, GameError> {
        validate_rows(rows)?;

        let meta = GameMeta {
            id: Uuid::new_v4().to_string(),
            played_at,
            num_players: rows.len() as u32,
            uploaded_by,
            image_url,
            created_at: Utc::now(),
        };
        let players = build_rows(&meta.id, rows);

        self.store.put(meta_item(&meta)?).await?;
        // One write per player row; a failure here leaves the rows written
        // so far visible alongside the metadata.
        for player in &players {
            self.store.put(player_item(&meta, player)?).await?;
        }

        info!(
            game_id = %meta.id,
            num_players = meta.num_players,
            "Game created"
        );

        Ok(Game::from_parts(meta, players))
    }

    /// Reads metadata plus all player rows for a game id
    #[instrument(skip(self))]
    pub async fn get_game(&self, game_id: &str) -> Result<Option<Game>, GameError> {
        let partition = game_partition(game_id);
        let Some(item) = self.store.get(&partition, META_SORT).await? else {
            debug!(game_id = %game_id, "Game not found");
            return Ok(None);
        };

        let meta: GameMeta = decode(&item)?;
        let players = self.load_player_rows(&partition).await?;
        Ok(Some(Game::from_parts(meta, players)))
    }

    /// Recent games from the date index, newest play date first
    #[instrument(skip(self))]
    pub async fn recent_games(&self, limit: usize) -> Result<Vec<Game>, GameError> {
        let meta_items = self.store.query_recent(limit).await?;

        let mut games = Vec::with_capacity(meta_items.len());
        for item in meta_items {
            let meta: GameMeta = decode(&item)?;
            let players = self.load_player_rows(&item.partition).await?;
            games.push(Game::from_parts(meta, players));
        }

        debug!(limit, count = games.len(), "Recent games fetched");
        Ok(games)
    }

    /// Games containing a player row whose name equals `raw_name` exactly.
    /// The name index is case-sensitive; case-insensitive matching belongs
    /// to identity resolution, not this lookup.
    #[instrument(skip(self))]
    pub async fn games_by_raw_name(
        &self,
        raw_name: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Game>, GameError> {
        let row_items = self.store.query_by_player(raw_name, limit).await?;

        let mut seen = std::collections::HashSet::new();
        let mut games = Vec::new();
        for item in row_items {
            if !seen.insert(item.partition.clone()) {
                continue;
            }
            let Some(meta_record) = self.store.get(&item.partition, META_SORT).await? else {
                // Player row without metadata: the game is mid-delete or
                // was left partially written.
                warn!(partition = %item.partition, "Orphaned player row, skipping");
                continue;
            };
            let meta: GameMeta = decode(&meta_record)?;
            let players = self.load_player_rows(&item.partition).await?;
            games.push(Game::from_parts(meta, players));
        }

        if let Some(limit) = limit {
            games.truncate(limit);
        }

        debug!(raw_name = %raw_name, count = games.len(), "Games by player fetched");
        Ok(games)
    }

    /// Full replace of a game's play date and player rows, recomputing
    /// totals and winners exactly as `create_game` does. Returns None (and
    /// writes nothing) when the game does not exist.
    ///
    /// The delete-then-rewrite of player rows is not atomic: a failure
    /// mid-sequence can leave the game with a partial or empty player set.
    #[instrument(skip(self, rows))]
    pub async fn update_game(
        &self,
        game_id: &str,
        played_at: NaiveDate,
        rows: &[NewPlayerScore],
    ) -> Result<Option<Game>, GameError> {
        validate_rows(rows)?;

        let partition = game_partition(game_id);
        let Some(existing_meta) = self.store.get(&partition, META_SORT).await? else {
            debug!(game_id = %game_id, "Game not found for update");
            return Ok(None);
        };
        let mut meta: GameMeta = decode(&existing_meta)?;

        let existing_rows = self.store.query_prefix(&partition, PLAYER_SORT_PREFIX).await?;
        for item in existing_rows {
            self.store.delete(&item.partition, &item.sort).await?;
        }

        let players = build_rows(&meta.id, rows);
        meta.played_at = played_at;
        meta.num_players = rows.len() as u32;
        for player in &players {
            self.store.put(player_item(&meta, player)?).await?;
        }
        self.store.put(meta_item(&meta)?).await?;

        info!(
            game_id = %game_id,
            num_players = meta.num_players,
            "Game updated"
        );

        Ok(Some(Game::from_parts(meta, players)))
    }

    /// Removes metadata and all player rows; false if the game did not exist
    #[instrument(skip(self))]
    pub async fn delete_game(&self, game_id: &str) -> Result<bool, GameError> {
        let partition = game_partition(game_id);
        let removed = self.store.delete(&partition, META_SORT).await?;

        let rows = self.store.query_prefix(&partition, PLAYER_SORT_PREFIX).await?;
        for item in rows {
            self.store.delete(&item.partition, &item.sort).await?;
        }

        if removed {
            info!(game_id = %game_id, "Game deleted");
        } else {
            debug!(game_id = %game_id, "Game not found for delete");
        }
        Ok(removed)
    }

    async fn load_player_rows(&self, partition: &str) -> Result<Vec<PlayerScore>, GameError> {
        let items = self.store.query_prefix(partition, PLAYER_SORT_PREFIX).await?;
        items.iter().map(|item| decode(item)).collect()
    }
}

fn validate_rows(rows: &[NewPlayerScore]) -> Result<(), GameError> {
    if rows.is_empty() {
        return Err(GameError::Validation(
            "a game requires at least one player row".to_string(),
        ));
    }
    for row in rows {
        if row.name.trim().is_empty() {
            return Err(GameError::Validation(
                "player name cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}

fn build_rows(game_id: &str, rows: &[NewPlayerScore]) -> Vec<PlayerScore> {
    let mut players: Vec<PlayerScore> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| PlayerScore {
            id: Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            player_name: row.name.trim().to_string(),
            position: index as u32 + 1,
            scores: row.scores,
            total_score: row.scores.total(),
            is_winner: false,
        })
        .collect();
    mark_winners(&mut players);
    players
}

fn meta_item(meta: &GameMeta) -> Result<StoredItem, StorageError> {
    Ok(StoredItem {
        partition: game_partition(&meta.id),
        sort: META_SORT.to_string(),
        played_at: Some(meta.played_at),
        player_name: None,
        created_at: meta.created_at,
        payload: serde_json::to_value(meta)?,
    })
}

fn player_item(meta: &GameMeta, player: &PlayerScore) -> Result<StoredItem, StorageError> {
    Ok(StoredItem {
        partition: game_partition(&meta.id),
        sort: player_sort(player.position),
        played_at: Some(meta.played_at),
        player_name: Some(player.player_name.clone()),
        created_at: meta.created_at,
        payload: serde_json::to_value(player)?,
    })
}

fn decode<T: serde::de::DeserializeOwned>(item: &StoredItem) -> Result<T, GameError> {
    serde_json::from_value(item.payload.clone())
        .map_err(|e| GameError::Storage(StorageError::Corrupt(e)))
}
