//! Stockpile Core Library
//!
//! Domain error taxonomy and the storage port shared by every backend.

// Re-export pure types from stockpile-types
pub use stockpile_types::*;

pub mod error;
pub mod ports;

pub use error::{Result, StockpileError};
pub use ports::ItemStore;
