//! Error types for Stockpile

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StockpileError>;

#[derive(Error, Debug)]
pub enum StockpileError {
    /// Malformed identifier or request body.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation targeted an id with no stored item.
    #[error("Item not found: {0}")]
    NotFound(i64),

    /// The backing medium failed; the operation did not take effect.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl StockpileError {
    pub fn storage(err: impl std::fmt::Display) -> Self {
        StockpileError::Storage(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StockpileError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(StockpileError::NotFound(7).to_string(), "Item not found: 7");
        assert_eq!(
            StockpileError::storage("disk full").to_string(),
            "Storage error: disk full"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(StockpileError::NotFound(1).is_not_found());
        assert!(!StockpileError::Validation("bad".into()).is_not_found());
    }
}
