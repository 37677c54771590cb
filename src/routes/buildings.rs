use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{Building, NewBuilding};

pub async fn create_building(
    State(state): State<AppState>,
    Json(req): Json<NewBuilding>,
) -> ApiResult<impl IntoResponse> {
    if req.building_name.trim().is_empty() {
        return Err(ApiError::ValidationError {
            field: "buildingName".to_string(),
            message: "Building name cannot be empty".to_string(),
        });
    }
    if req.address.trim().is_empty() {
        return Err(ApiError::ValidationError {
            field: "address".to_string(),
            message: "Address cannot be empty".to_string(),
        });
    }
    if req.total_area.is_some_and(|a| a < 0.0 || !a.is_finite()) {
        return Err(ApiError::ValidationError {
            field: "totalArea".to_string(),
            message: "Total area must be a non-negative number".to_string(),
        });
    }

    let building = state.store.insert_building(req);
    info!(building_id = building.id, "building created");
    Ok((StatusCode::CREATED, Json(building)))
}

pub async fn list_buildings(State(state): State<AppState>) -> Json<Vec<Building>> {
    Json(state.store.buildings())
}
