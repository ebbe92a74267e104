//! Storage layer
//!
//! Uses SQLite (embedded) instead of PostgreSQL for simplicity.
//! The in-memory store needs no setup and loses everything on exit.

pub mod db;
pub mod memory;
pub mod seed;

pub use db::SqlStore;
pub use memory::MemoryStore;
pub use seed::seed_if_empty;
