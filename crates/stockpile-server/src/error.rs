//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stockpile_core::StockpileError;

/// Handler error, rendered as a plain-text body with a fixed status per kind.
#[derive(Debug)]
pub struct ApiError(pub StockpileError);

impl ApiError {
    pub fn invalid_id() -> Self {
        ApiError(StockpileError::Validation("invalid id".to_string()))
    }

    pub fn invalid_json() -> Self {
        ApiError(StockpileError::Validation("invalid json".to_string()))
    }

    pub fn status(&self) -> StatusCode {
        match self.0 {
            StockpileError::Validation(_) => StatusCode::BAD_REQUEST,
            StockpileError::NotFound(_) => StatusCode::NOT_FOUND,
            StockpileError::Storage(_) | StockpileError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StockpileError> for ApiError {
    fn from(e: StockpileError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.0 {
            StockpileError::Validation(msg) => msg,
            StockpileError::NotFound(_) => "not found".to_string(),
            StockpileError::Storage(msg) | StockpileError::Config(msg) => {
                tracing::error!("Request failed: {}", msg);
                "internal server error".to_string()
            }
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::invalid_id().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::invalid_json().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError(StockpileError::NotFound(4)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(StockpileError::storage("connection reset")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_storage_details_are_not_leaked() {
        let response = ApiError(StockpileError::storage("secret dsn")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"internal server error");
    }
}
