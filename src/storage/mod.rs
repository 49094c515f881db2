// Storage collaborator for game records.
//
// Persistence is delegated to a hosted key-value table addressed by a
// two-part key (partition, sort) with two sparse secondary indexes: one
// ordered by play date for "recent games", one keyed by raw player name
// for "games by player". The trait below captures exactly the capabilities
// the repository uses so the hosted client can be swapped for the in-memory
// table in development and tests.

mod memory;

pub use memory::InMemoryTableStore;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("corrupt stored record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// One item in the table. The key is (partition, sort); `played_at` and
/// `player_name` are index attributes, not payload: an item appears in the
/// date index when it carries `played_at` without `player_name`, and in the
/// player-name index when it carries `player_name`.
#[derive(Debug, Clone)]
pub struct StoredItem {
    pub partition: String,
    pub sort: String,
    pub played_at: Option<NaiveDate>,
    pub player_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

/// Trait for the key-value table operations the game repository needs.
///
/// No cross-key transactions: each call is a single table operation, and
/// multi-item sequences built on top of this trait are not atomic.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Upserts an item by its (partition, sort) key.
    async fn put(&self, item: StoredItem) -> Result<(), StorageError>;

    /// Reads a single item by its full key.
    async fn get(&self, partition: &str, sort: &str)
        -> Result<Option<StoredItem>, StorageError>;

    /// Deletes a single item; returns false if it was absent.
    async fn delete(&self, partition: &str, sort: &str) -> Result<bool, StorageError>;

    /// Returns all items in a partition whose sort key starts with
    /// `sort_prefix`, in sort-key order.
    async fn query_prefix(
        &self,
        partition: &str,
        sort_prefix: &str,
    ) -> Result<Vec<StoredItem>, StorageError>;

    /// Date index: items carrying `played_at` but no `player_name`,
    /// newest play date first (creation time breaks ties).
    async fn query_recent(&self, limit: usize) -> Result<Vec<StoredItem>, StorageError>;

    /// Player-name index: items whose `player_name` equals `raw_name`
    /// exactly (case-sensitive), newest play date first.
    async fn query_by_player(
        &self,
        raw_name: &str,
        limit: Option<usize>,
    ) -> Result<Vec<StoredItem>, StorageError>;
}
