//! Stockpile Types - Pure type definitions
//!
//! This crate contains only plain data types shared by the storage port and
//! the HTTP layer. It has no async runtime or database dependencies.

pub mod item;

pub use item::*;

use serde::{Deserialize, Serialize};

/// Health check response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_shape() {
        let json = serde_json::to_string(&HealthStatus::ok()).unwrap();
        assert_eq!(json, r#"{"status":"ok"}"#);
    }
}
