//! In-memory item store (a map behind one reader/writer lock)

use async_trait::async_trait;
use stockpile_core::{Item, ItemStore, Result, StockpileError};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Items held in process memory.
///
/// Readers (`list`, `get`) share the lock; writers (`create`, `update`,
/// `delete`) take it exclusively. Nothing awaits while the lock is held.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    items: HashMap<i64, Item>,
    /// Next id to hand out. Only ever increases.
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn create(&self, item: Item) -> Result<Item> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let item = item.with_id(id);
        inner.items.insert(id, item.clone());
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<Item>> {
        let inner = self.inner.read().await;
        Ok(inner.items.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Item>> {
        Ok(self.inner.read().await.items.get(&id).cloned())
    }

    async fn update(&self, id: i64, item: Item) -> Result<Item> {
        let mut inner = self.inner.write().await;
        match inner.items.get_mut(&id) {
            Some(stored) => {
                *stored = item.with_id(id);
                Ok(stored.clone())
            }
            None => Err(StockpileError::NotFound(id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.inner.write().await.items.remove(&id).is_some())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_basic_operations() {
        let store = MemoryStore::new();

        // Create and read back
        let created = store.create(Item::new("foo", "bar")).await.unwrap();
        assert_eq!(created.id, 1);
        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        // Non-existent id
        assert_eq!(store.get(42).await.unwrap(), None);

        // Delete
        assert!(store.delete(created.id).await.unwrap());
        assert_eq!(store.get(created.id).await.unwrap(), None);
        assert!(!store.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_ignores_caller_id() {
        let store = MemoryStore::new();
        let created = store
            .create(Item::new("foo", "bar").with_id(500))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(store.get(500).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.create(Item::new("a", "")).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(Item::new("b", "")).await.unwrap();
        assert_ne!(first.id, second.id);
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_forces_id() {
        let store = MemoryStore::new();
        let created = store.create(Item::new("foo", "bar")).await.unwrap();

        let updated = store
            .update(created.id, Item::new("foo2", "").with_id(999))
            .await
            .unwrap();
        assert_eq!(updated, Item::new("foo2", "").with_id(created.id));
        assert_eq!(store.get(created.id).await.unwrap(), Some(updated));
        assert_eq!(store.get(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_leaves_store_unchanged() {
        let store = MemoryStore::new();
        let created = store.create(Item::new("foo", "bar")).await.unwrap();

        let err = store
            .update(created.id + 1, Item::new("x", "y"))
            .await
            .unwrap_err();
        assert!(matches!(err, StockpileError::NotFound(id) if id == created.id + 1));
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_list_count_tracks_creates_and_deletes() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(store.create(Item::new(format!("item-{i}"), "")).await.unwrap().id);
        }
        assert!(store.delete(ids[1]).await.unwrap());
        assert!(store.delete(ids[3]).await.unwrap());
        assert!(!store.delete(ids[3]).await.unwrap());

        let listed: HashSet<i64> = store.list().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(listed, HashSet::from([ids[0], ids[2], ids[4]]));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(Item::new(format!("item-{i}"), "concurrent"))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            let id = handle.await.unwrap();
            assert_ne!(id, 0);
            assert!(ids.insert(id), "duplicate id {id}");
        }
        assert_eq!(store.len().await, 64);
    }
}
