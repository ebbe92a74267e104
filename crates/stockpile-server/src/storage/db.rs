//! SQLite item store (embedded, no external dependencies)

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use stockpile_core::{Item, ItemStore, StockpileError};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Items stored in the `items` table.
///
/// Every operation is a single autocommit statement; there is no
/// in-process locking.
pub struct SqlStore {
    pool: SqlitePool,
}

impl SqlStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", config.url);

        let options = SqliteConnectOptions::from_str(&config.url)
            .with_context(|| format!("Invalid database URL: {}", config.url))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true);

        if !config.is_in_memory() {
            let parent = database_file(&config.url)
                .and_then(|file| file.parent().map(Path::to_path_buf));
            if let Some(parent) = parent {
                if !parent.as_os_str().is_empty() {
                    tracing::debug!("Creating parent directory: {}", parent.display());
                    tokio::fs::create_dir_all(&parent).await.with_context(|| {
                        format!("Failed to create database directory: {}", parent.display())
                    })?;
                }
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .max_lifetime(config.max_lifetime)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to SQLite database at: {}", config.url))?;

        tracing::info!(
            "SQLite pool ready (max={}, min={}, lifetime={:?})",
            config.max_connections,
            config.min_connections,
            config.max_lifetime
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool. Migrations are not applied.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply pending scripts from `migrations/` in order.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");
        MIGRATOR
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations complete");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ItemStore for SqlStore {
    async fn create(&self, item: Item) -> stockpile_core::Result<Item> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO items (name, description)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .fetch_one(&self.pool)
        .await
        .map_err(StockpileError::storage)?;

        Ok(item.with_id(id))
    }

    async fn list(&self) -> stockpile_core::Result<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description FROM items
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StockpileError::storage)?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn get(&self, id: i64) -> stockpile_core::Result<Option<Item>> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description FROM items WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StockpileError::storage)?;

        Ok(row.map(Item::from))
    }

    async fn update(&self, id: i64, item: Item) -> stockpile_core::Result<Item> {
        let result = sqlx::query(
            r#"
            UPDATE items SET name = $1, description = $2 WHERE id = $3
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StockpileError::storage)?;

        if result.rows_affected() == 0 {
            return Err(StockpileError::NotFound(id));
        }
        Ok(item.with_id(id))
    }

    async fn delete(&self, id: i64) -> stockpile_core::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM items WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StockpileError::storage)?;

        Ok(result.rows_affected() > 0)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

/// Filesystem path named by a `sqlite:` URL, without its query string.
fn database_file(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: String,
}

impl From<ItemRow> for Item {
    fn from(r: ItemRow) -> Self {
        Item {
            id: r.id,
            name: r.name,
            description: r.description,
        }
    }
}
