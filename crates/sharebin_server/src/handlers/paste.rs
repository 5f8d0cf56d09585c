use axum::{
    extract::{Path, State},
    Json,
};
use sharebin_core::{
    error::AppError,
    ids,
    models::paste::{CreatePasteRequest, Paste},
};

use crate::{error::ApiError, AppState};

/// Create a paste, assigning a fresh unique id.
pub async fn create_paste(
    State(state): State<AppState>,
    Json(req): Json<CreatePasteRequest>,
) -> Result<Json<Paste>, ApiError> {
    // Check paste size limit
    if req.content.len() > state.config.max_paste_size {
        return Err(AppError::BadRequest(format!(
            "Paste size exceeds maximum of {} bytes",
            state.config.max_paste_size
        ))
        .into());
    }

    let id = ids::generate_unique_id(|candidate| {
        state.db.pastes.exists(candidate).unwrap_or(false)
    });
    let paste = Paste::with_id(id, req);
    state.db.pastes.create(&paste)?;
    Ok(Json(paste))
}

pub async fn get_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Paste>, ApiError> {
    state
        .db
        .pastes
        .get(&id)?
        .map(Json)
        .ok_or(ApiError(AppError::NotFound))
}

/// Delete a paste. Idempotent from the client's perspective: a repeat call
/// reports not-found without corrupting state.
pub async fn delete_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if state.db.pastes.delete(&id)? {
        Ok(Json(serde_json::json!({ "deleted": true, "id": id })))
    } else {
        Err(ApiError(AppError::NotFound))
    }
}
