//! HTTP route handlers of the development server.
//!
//! The handlers implement the backend contract the screens consume, on top of the
//! in-memory store in [`crate::state::AppState`]:
//!
//! - `buildings`: building creation and listing
//! - `files`: per-building file list, rename, delete
//! - `upload`: multipart upload
//! - `health`: liveness, version info and screen settings

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::gateway::routes as paths;
use crate::state::AppState;

pub mod buildings;
pub mod files;
pub mod health;
pub mod upload;

/// Multipart framing on top of the configured maximum file size.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// All API routes, without the static UI fallback.
pub fn api_router(state: AppState) -> Router {
    let body_limit = state.config.upload.max_bytes + MULTIPART_OVERHEAD;
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/version", get(health::version))
        .route(paths::SETTINGS, get(health::settings))
        .route(paths::BUILDINGS, post(buildings::create_building).get(buildings::list_buildings))
        .route(paths::BUILDING_FILES, get(files::list_files))
        .route(paths::FILE, patch(files::rename_file).delete(files::delete_file))
        .route(paths::UPLOAD, post(upload::upload_file))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
