//! Liveness check

use axum::Json;
use stockpile_core::HealthStatus;

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
