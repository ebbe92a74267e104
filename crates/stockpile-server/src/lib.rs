//! Stockpile Server
//!
//! HTTP CRUD service for items, backed by either an in-memory map or an
//! embedded SQLite table.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;

pub use app::{open_store, router, AppState};
pub use config::Config;
