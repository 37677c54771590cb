use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use super::FileGateway;
use crate::error::{ClientError, ClientResult};
use crate::types::{Building, BuildingId, FileId, FileRecord, NewBuilding, UploadPayload, UploadReceipt};

/// A gateway call as recorded by [`MemoryGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListFiles(BuildingId),
    RenameFile(FileId, String),
    DeleteFile(FileId),
    CreateBuilding(String),
    UploadFile(String),
}

/// A failure to inject into [`MemoryGateway`]. Stays armed until cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    ListFiles,
    RenameFile,
    DeleteFile { status: u16 },
    CreateBuilding,
    Upload,
}

#[derive(Debug, Clone)]
struct StoredFile {
    building_id: BuildingId,
    record: FileRecord,
}

#[derive(Debug, Default)]
struct Inner {
    buildings: BTreeMap<BuildingId, Building>,
    files: BTreeMap<FileId, StoredFile>,
    next_building_id: BuildingId,
    next_file_id: FileId,
    uploads: u64,
    calls: Vec<Call>,
    faults: Vec<Fault>,
}

impl Inner {
    fn fault(&self, pred: impl Fn(&Fault) -> bool) -> Option<Fault> {
        self.faults.iter().copied().find(|f| pred(f))
    }
}

/// In-memory backend.
///
/// Cloning shares the store. The inherent methods are the storage operations the
/// development server exposes over HTTP; the [`FileGateway`] impl adds call recording
/// and fault injection on top of them for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a panicking test thread; the data is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn insert_building(&self, details: NewBuilding) -> Building {
        let mut inner = self.lock();
        inner.next_building_id += 1;
        let building = Building { id: inner.next_building_id, details };
        inner.buildings.insert(building.id, building.clone());
        building
    }

    pub fn building_exists(&self, building_id: BuildingId) -> bool {
        self.lock().buildings.contains_key(&building_id)
    }

    pub fn buildings(&self) -> Vec<Building> {
        self.lock().buildings.values().cloned().collect()
    }

    /// Stores a file record for `building_id`. Returns `None` if the building is unknown.
    pub fn insert_file(&self, building_id: BuildingId, file_name: &str) -> Option<FileRecord> {
        let mut inner = self.lock();
        if !inner.buildings.contains_key(&building_id) {
            return None;
        }
        inner.next_file_id += 1;
        let now = Utc::now();
        let record = FileRecord {
            id: inner.next_file_id,
            file_name: file_name.to_string(),
            create_time: now,
            update_time: now,
        };
        inner.files.insert(record.id, StoredFile { building_id, record: record.clone() });
        Some(record)
    }

    /// Files of a building ordered by id. `None` if the building is unknown.
    pub fn files_of(&self, building_id: BuildingId) -> Option<Vec<FileRecord>> {
        let inner = self.lock();
        if !inner.buildings.contains_key(&building_id) {
            return None;
        }
        Some(
            inner
                .files
                .values()
                .filter(|f| f.building_id == building_id)
                .map(|f| f.record.clone())
                .collect(),
        )
    }

    pub fn rename(&self, file_id: FileId, new_name: &str) -> Option<FileRecord> {
        let mut inner = self.lock();
        let stored = inner.files.get_mut(&file_id)?;
        stored.record.file_name = new_name.to_string();
        stored.record.update_time = Utc::now();
        Some(stored.record.clone())
    }

    pub fn remove(&self, file_id: FileId) -> Option<FileRecord> {
        self.lock().files.remove(&file_id).map(|f| f.record)
    }

    /// Accepts an upload and answers with a JSON summary of what arrived.
    ///
    /// When the payload names a known building the file is also listed under it.
    pub fn accept_upload(&self, payload: &UploadPayload) -> UploadReceipt {
        let stored = payload.building_id.and_then(|b| self.insert_file(b, &payload.file_name));
        let mut inner = self.lock();
        inner.uploads += 1;
        let lines = std::str::from_utf8(&payload.bytes).map(|s| s.lines().count()).ok();
        json!({
            "uploadId": inner.uploads,
            "fileId": stored.map(|f| f.id),
            "buildingId": payload.building_id,
            "fileName": payload.file_name,
            "contentType": payload.content_type,
            "size": payload.bytes.len(),
            "lines": lines,
            "receivedAt": Utc::now().to_rfc3339(),
        })
    }

    pub fn fail(&self, fault: Fault) {
        self.lock().faults.push(fault);
    }

    pub fn clear_faults(&self) {
        self.lock().faults.clear();
    }

    /// Every gateway call so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    fn record(&self, call: Call) {
        self.lock().calls.push(call);
    }
}

#[async_trait(?Send)]
impl FileGateway for MemoryGateway {
    async fn list_files(&self, building_id: BuildingId) -> ClientResult<Vec<FileRecord>> {
        self.record(Call::ListFiles(building_id));
        if self.lock().fault(|f| matches!(f, Fault::ListFiles)).is_some() {
            return Err(ClientError::Transport("HTTP 503".to_string()));
        }
        self.files_of(building_id)
            .ok_or_else(|| ClientError::Transport(format!("HTTP 404: building {} not found", building_id)))
    }

    async fn rename_file(&self, file_id: FileId, new_name: &str) -> ClientResult<()> {
        self.record(Call::RenameFile(file_id, new_name.to_string()));
        if self.lock().fault(|f| matches!(f, Fault::RenameFile)).is_some() {
            return Err(ClientError::RenameFailed("HTTP 500".to_string()));
        }
        self.rename(file_id, new_name)
            .map(|_| ())
            .ok_or_else(|| ClientError::RenameFailed(format!("HTTP 404: file {} not found", file_id)))
    }

    async fn delete_file(&self, file_id: FileId) -> ClientResult<()> {
        self.record(Call::DeleteFile(file_id));
        if let Some(Fault::DeleteFile { status }) = self.lock().fault(|f| matches!(f, Fault::DeleteFile { .. })) {
            return Err(ClientError::DeletionFailed { status });
        }
        self.remove(file_id).map(|_| ()).ok_or(ClientError::DeletionFailed { status: 404 })
    }

    async fn create_building(&self, building: &NewBuilding) -> ClientResult<Building> {
        self.record(Call::CreateBuilding(building.building_name.clone()));
        if self.lock().fault(|f| matches!(f, Fault::CreateBuilding)).is_some() {
            return Err(ClientError::CreateFailed("HTTP 500".to_string()));
        }
        Ok(self.insert_building(building.clone()))
    }

    async fn upload_file(&self, payload: UploadPayload) -> ClientResult<UploadReceipt> {
        self.record(Call::UploadFile(payload.file_name.clone()));
        if self.lock().fault(|f| matches!(f, Fault::Upload)).is_some() {
            return Err(ClientError::UploadFailed("HTTP 500".to_string()));
        }
        Ok(self.accept_upload(&payload))
    }
}
