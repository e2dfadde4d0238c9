//! Blob API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use super::ApiResult;
use crate::errors::AppError;
use crate::ServerState;

/// Longest accepted blob identifier.
const MAX_BLOB_ID_LEN: usize = 128;

fn validate_blob_id(id: &str) -> Result<(), AppError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_BLOB_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Invalid blob id: {}", id)))
    }
}

/// GET /api/blobs/{id} - Get the stored document.
pub async fn get_blob(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    validate_blob_id(&id)?;

    match state.repo.get_blob(&id).await? {
        Some(body) => Ok(Json(body)),
        None => Err(AppError::NotFound(format!("Blob {} not found", id))),
    }
}

/// PUT /api/blobs/{id} - Replace the stored document wholesale.
pub async fn put_blob(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    validate_blob_id(&id)?;

    state.repo.put_blob(&id, &body).await?;
    tracing::info!(blob = %id, "Blob replaced");

    Ok(Json(body))
}
