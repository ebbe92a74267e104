//! Sample data for fresh databases

use stockpile_core::{Item, ItemStore, Result};

const SAMPLE_NAMES: [&str; 2] = ["Sample Item 1", "Sample Item 2"];
const SAMPLE_DESCRIPTION: &str = "Seeded at startup";

/// Insert the sample items when `store` holds nothing.
///
/// Returns how many items were created.
pub async fn seed_if_empty(store: &dyn ItemStore) -> Result<usize> {
    if !store.list().await?.is_empty() {
        tracing::debug!("Store already populated, skipping seed");
        return Ok(0);
    }

    for name in SAMPLE_NAMES {
        let item = store.create(Item::new(name, SAMPLE_DESCRIPTION)).await?;
        tracing::info!("Seeded item {} ({})", item.id, item.name);
    }

    Ok(SAMPLE_NAMES.len())
}
