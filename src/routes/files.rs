use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{BuildingId, FileId, FileRecord, RenameRequest};

pub async fn list_files(
    State(state): State<AppState>,
    Path(building_id): Path<BuildingId>,
) -> ApiResult<Json<Vec<FileRecord>>> {
    state
        .store
        .files_of(building_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Building {} not found", building_id)))
}

pub async fn rename_file(
    State(state): State<AppState>,
    Path(file_id): Path<FileId>,
    Json(req): Json<RenameRequest>,
) -> ApiResult<Json<FileRecord>> {
    if req.contents.trim().is_empty() {
        return Err(ApiError::ValidationError {
            field: "contents".to_string(),
            message: "File name cannot be empty".to_string(),
        });
    }
    let record = state
        .store
        .rename(file_id, &req.contents)
        .ok_or_else(|| ApiError::NotFound(format!("File {} not found", file_id)))?;
    info!(file_id, new_name = %record.file_name, "file renamed");
    Ok(Json(record))
}

pub async fn delete_file(State(state): State<AppState>, Path(file_id): Path<FileId>) -> ApiResult<Json<Value>> {
    state
        .store
        .remove(file_id)
        .ok_or_else(|| ApiError::NotFound(format!("File {} not found", file_id)))?;
    info!(file_id, "file deleted");
    Ok(Json(json!({ "deleted": file_id })))
}
