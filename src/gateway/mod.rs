//! The boundary through which the screens talk to the backend.
//!
//! [`FileGateway`] is the typed async interface every screen depends on. The web front end
//! implements it over `fetch`; [`memory::MemoryGateway`] implements it in memory for tests
//! and for the development server. [`Endpoint`] describes the HTTP side of each operation
//! so that the client and the development router agree on methods and paths.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::types::{Building, BuildingId, FileId, FileRecord, NewBuilding, UploadPayload, UploadReceipt};

pub mod memory;

pub use memory::MemoryGateway;

/// Typed access to the backend.
///
/// Futures are not required to be `Send`: browser fetch futures are not, and all callers
/// run on a single cooperative event loop.
#[async_trait(?Send)]
pub trait FileGateway {
    /// `GET /buildings/{buildingId}/files`
    async fn list_files(&self, building_id: BuildingId) -> ClientResult<Vec<FileRecord>>;

    /// `PATCH /files/{fileId}` with `{ "contents": new_name }`
    async fn rename_file(&self, file_id: FileId, new_name: &str) -> ClientResult<()>;

    /// `DELETE /files/{fileId}`. Anything but 200 is [`crate::error::ClientError::DeletionFailed`].
    async fn delete_file(&self, file_id: FileId) -> ClientResult<()>;

    /// `POST /buildings`
    async fn create_building(&self, building: &NewBuilding) -> ClientResult<Building>;

    /// `POST /upload` (multipart, field `file`)
    async fn upload_file(&self, payload: UploadPayload) -> ClientResult<UploadReceipt>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Method and path of one backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
}

impl Endpoint {
    pub fn list_files(building_id: BuildingId) -> Self {
        Self { method: Method::Get, path: format!("/buildings/{}/files", building_id) }
    }

    pub fn rename_file(file_id: FileId) -> Self {
        Self { method: Method::Patch, path: format!("/files/{}", file_id) }
    }

    pub fn delete_file(file_id: FileId) -> Self {
        Self { method: Method::Delete, path: format!("/files/{}", file_id) }
    }

    pub fn list_buildings() -> Self {
        Self { method: Method::Get, path: routes::BUILDINGS.to_string() }
    }

    /// Screen settings served by the development server.
    pub fn settings() -> Self {
        Self { method: Method::Get, path: routes::SETTINGS.to_string() }
    }

    pub fn create_building() -> Self {
        Self { method: Method::Post, path: "/buildings".to_string() }
    }

    pub fn upload() -> Self {
        Self { method: Method::Post, path: "/upload".to_string() }
    }

    /// Full URL relative to `base` (empty base means same-origin).
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path)
    }
}

/// Router patterns of the backend contract (axum path syntax).
pub mod routes {
    pub const BUILDINGS: &str = "/buildings";
    pub const BUILDING_FILES: &str = "/buildings/{building_id}/files";
    pub const FILE: &str = "/files/{file_id}";
    pub const UPLOAD: &str = "/upload";
    pub const SETTINGS: &str = "/settings";
    /// Name of the multipart field carrying the uploaded file.
    pub const UPLOAD_FIELD: &str = "file";
}
