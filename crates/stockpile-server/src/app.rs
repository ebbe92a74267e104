//! Router and store wiring

use crate::config::{Config, StorageBackend};
use crate::handlers;
use crate::storage::{seed_if_empty, MemoryStore, SqlStore};
use anyhow::{Context, Result};
use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use stockpile_core::ItemStore;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        .merge(item_routes())
        // Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(handlers::items::list).post(handlers::items::create),
        )
        .route(
            "/items/:id",
            get(handlers::items::get)
                .put(handlers::items::update)
                .delete(handlers::items::delete),
        )
}

/// Build the configured store, migrating and seeding the SQLite backend.
pub async fn open_store(config: &Config) -> Result<Arc<dyn ItemStore>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory store (data is lost on exit)");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => {
            let store = SqlStore::connect(&config.database)
                .await
                .context("Failed to initialize database")?;
            store.migrate().await?;

            if config.seed_sample_data {
                let seeded = seed_if_empty(&store)
                    .await
                    .context("Failed to seed sample data")?;
                if seeded > 0 {
                    info!("Seeded {} sample items", seeded);
                }
            }

            Ok(Arc::new(store))
        }
    }
}
