use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;
use crate::types::ClientSettings;

// Health check endpoint
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}

// Screen settings from the `[ui]` and `[upload]` configuration sections
pub async fn settings(State(state): State<AppState>) -> Json<ClientSettings> {
    Json(ClientSettings {
        page_size: state.config.ui.page_size,
        max_upload_bytes: state.config.upload.max_bytes,
    })
}
