use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::gateway::routes::UPLOAD_FIELD;
use crate::state::AppState;
use crate::types::{BuildingId, UploadPayload, UploadReceipt};

pub async fn upload_file(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult<Json<UploadReceipt>> {
    let max_bytes = state.config.upload.max_bytes;
    let mut payload: Option<UploadPayload> = None;
    let mut building_id: Option<BuildingId> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(UPLOAD_FIELD) => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
                if bytes.len() > max_bytes {
                    return Err(ApiError::PayloadTooLarge(format!(
                        "File exceeds the limit of {} bytes",
                        max_bytes
                    )));
                }
                let mut p = UploadPayload::new(file_name, bytes.to_vec());
                p.content_type = content_type;
                payload = Some(p);
            }
            Some("buildingId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read buildingId: {}", e)))?;
                building_id = Some(text.trim().parse().map_err(|_| ApiError::ValidationError {
                    field: "buildingId".to_string(),
                    message: format!("Not a building id: {}", text),
                })?);
            }
            other => warn!(field = ?other, "ignoring unexpected multipart field"),
        }
    }

    let mut payload = payload.ok_or_else(|| ApiError::ValidationError {
        field: UPLOAD_FIELD.to_string(),
        message: "No file in request".to_string(),
    })?;
    if let Some(id) = building_id {
        if !state.store.building_exists(id) {
            return Err(ApiError::NotFound(format!("Building {} not found", id)));
        }
        payload.building_id = Some(id);
    }

    let receipt = state.store.accept_upload(&payload);
    info!(file_name = %payload.file_name, size = payload.bytes.len(), "upload accepted");
    Ok(Json(receipt))
}
