//! Shared data types for the building and file screens.
//!
//! These mirror the JSON the backend speaks (camelCase field names) and are used by the
//! view state machines, the gateway implementations and the development server alike.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a building record on the backend.
pub type BuildingId = i64;

/// Identifier of an uploaded file record on the backend.
pub type FileId = i64;

/// An uploaded artifact associated with a building.
///
/// The backend owns these records; the client only ever holds a cached copy that is
/// replaced wholesale on every refresh.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: FileId,
    pub file_name: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Body of `PATCH /files/{fileId}`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RenameRequest {
    /// The new file name. The backend calls this field `contents`.
    pub contents: String,
}

/// Validated body of `POST /buildings`.
///
/// Optional numeric fields are sent as `null` when the user left them blank.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBuilding {
    pub building_name: String,
    pub address: String,
    pub total_area: Option<f64>,
    pub ground_floors: Option<u32>,
    pub basement_floors: Option<u32>,
}

/// A building as echoed back by the backend after creation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: BuildingId,
    #[serde(flatten)]
    pub details: NewBuilding,
}

/// A file chosen in the upload widget, ready to be sent as multipart field `file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    /// Sent as the extra multipart field `buildingId` when set.
    pub building_id: Option<BuildingId>,
}

impl UploadPayload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), content_type: None, bytes, building_id: None }
    }

    pub fn for_building(mut self, building_id: BuildingId) -> Self {
        self.building_id = Some(building_id);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Settings the screens take from the server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    /// Rows per page in the file list.
    pub page_size: usize,
    pub max_upload_bytes: usize,
}

/// Whatever JSON the upload endpoint answers with. It is shown to the user verbatim.
pub type UploadReceipt = serde_json::Value;
