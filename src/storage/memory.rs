use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument};

use super::{StorageError, StoredItem, TableStore};

/// In-memory implementation of TableStore for development and testing
///
/// This provides a realistic implementation that can be used without a real
/// hosted table connection. The secondary indexes are evaluated as scans;
/// data is lost when the application restarts.
pub struct InMemoryTableStore {
    items: Mutex<HashMap<(String, String), StoredItem>>,
}

impl Default for InMemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTableStore {
    /// Creates a new empty in-memory table
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of items in the table
    pub fn item_count(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    #[instrument(skip(self, item))]
    async fn put(&self, item: StoredItem) -> Result<(), StorageError> {
        debug!(partition = %item.partition, sort = %item.sort, "Putting item into memory table");

        let mut items = self.items.lock().unwrap();
        items.insert((item.partition.clone(), item.sort.clone()), item);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(
        &self,
        partition: &str,
        sort: &str,
    ) -> Result<Option<StoredItem>, StorageError> {
        let items = self.items.lock().unwrap();
        let item = items
            .get(&(partition.to_string(), sort.to_string()))
            .cloned();

        debug!(partition = %partition, sort = %sort, found = item.is_some(), "Item lookup");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn delete(&self, partition: &str, sort: &str) -> Result<bool, StorageError> {
        let mut items = self.items.lock().unwrap();
        let removed = items
            .remove(&(partition.to_string(), sort.to_string()))
            .is_some();

        debug!(partition = %partition, sort = %sort, removed, "Item delete");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn query_prefix(
        &self,
        partition: &str,
        sort_prefix: &str,
    ) -> Result<Vec<StoredItem>, StorageError> {
        let items = self.items.lock().unwrap();
        let mut matches: Vec<StoredItem> = items
            .values()
            .filter(|item| item.partition == partition && item.sort.starts_with(sort_prefix))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.sort.cmp(&b.sort));

        debug!(partition = %partition, sort_prefix = %sort_prefix, count = matches.len(), "Prefix query");
        Ok(matches)
    }

    #[instrument(skip(self))]
    async fn query_recent(&self, limit: usize) -> Result<Vec<StoredItem>, StorageError> {
        let items = self.items.lock().unwrap();
        let mut matches: Vec<StoredItem> = items
            .values()
            .filter(|item| item.played_at.is_some() && item.player_name.is_none())
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            (b.played_at, b.created_at).cmp(&(a.played_at, a.created_at))
        });
        matches.truncate(limit);

        debug!(limit, count = matches.len(), "Date index query");
        Ok(matches)
    }

    #[instrument(skip(self))]
    async fn query_by_player(
        &self,
        raw_name: &str,
        limit: Option<usize>,
    ) -> Result<Vec<StoredItem>, StorageError> {
        let items = self.items.lock().unwrap();
        let mut matches: Vec<StoredItem> = items
            .values()
            .filter(|item| item.player_name.as_deref() == Some(raw_name))
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            (b.played_at, b.created_at).cmp(&(a.played_at, a.created_at))
        });
        if let Some(limit) = limit {
            matches.truncate(limit);
        }

        debug!(raw_name = %raw_name, count = matches.len(), "Player index query");
        Ok(matches)
    }
}
