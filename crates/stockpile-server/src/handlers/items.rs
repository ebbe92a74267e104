//! Item handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use stockpile_core::{Item, ItemPayload, StockpileError};

fn item_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    match id {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!("Rejected item id: {}", rejection);
            Err(ApiError::invalid_id())
        }
    }
}

/// Decode a JSON item body. The content type is not checked.
fn item_body(body: &[u8]) -> Result<Item, ApiError> {
    match serde_json::from_slice::<ItemPayload>(body) {
        Ok(payload) => Ok(payload.into()),
        Err(e) => {
            tracing::debug!("Rejected item body: {}", e);
            Err(ApiError::invalid_json())
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.list().await?;
    Ok(Json(items))
}

pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = item_body(&body)?;
    let created = state.store.create(item).await?;
    tracing::info!("Created item {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>, ApiError> {
    let id = item_id(id)?;
    match state.store.get(id).await? {
        Some(item) => Ok(Json(item)),
        None => Err(StockpileError::NotFound(id).into()),
    }
}

pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> Result<Json<Item>, ApiError> {
    let id = item_id(id)?;
    let item = item_body(&body)?;
    let updated = state.store.update(id, item).await?;
    tracing::info!("Updated item {}", id);
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = item_id(id)?;
    if !state.store.delete(id).await? {
        return Err(StockpileError::NotFound(id).into());
    }
    tracing::info!("Deleted item {}", id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_body_decodes_payload() {
        let item = item_body(br#"{"id":9,"name":"foo","description":null}"#).unwrap();
        assert_eq!(item, Item::new("foo", ""));
    }

    #[test]
    fn test_item_body_rejects_malformed_json() {
        let bodies: [&[u8]; 4] = [b"", b"{not json", br#"{"name":1}"#, br#""text""#];
        for body in bodies {
            let err = item_body(body).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }
}
