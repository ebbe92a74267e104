//! Storage trait for item persistence

use crate::Result;
use async_trait::async_trait;
use stockpile_types::Item;

/// Item store
///
/// Implementations:
/// - `MemoryStore` - map behind a single reader/writer lock
/// - `SqlStore` - one SQL statement per operation against a pool
///
/// Ids are assigned by the store, are never zero once assigned, and are never
/// reused after deletion. Ordering of `list` is unspecified.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Store `item` under a fresh id, ignoring `item.id`.
    ///
    /// An error means the item was not persisted.
    async fn create(&self, item: Item) -> Result<Item>;

    /// Every stored item, in no particular order.
    async fn list(&self) -> Result<Vec<Item>>;

    /// `None` when no item with `id` exists, whether or not it ever did.
    async fn get(&self, id: i64) -> Result<Option<Item>>;

    /// Replace name and description of the item at `id`.
    ///
    /// The returned item always carries `id`, whatever `item.id` held.
    /// Fails with `StockpileError::NotFound` and changes nothing when `id`
    /// is absent.
    async fn update(&self, id: i64, item: Item) -> Result<Item>;

    /// Remove the item at `id`, reporting whether one existed.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Short backend label used in logs.
    fn backend_name(&self) -> &'static str {
        "unknown"
    }
}
