use async_trait::async_trait;
use building_files::error::{ClientError, ClientResult};
use building_files::gateway::{routes, Endpoint, FileGateway, Method};
use building_files::types::{
    Building, BuildingId, ClientSettings, FileId, FileRecord, NewBuilding, RenameRequest, UploadPayload, UploadReceipt,
};
use reqwasm::http::{Request, Response};
use serde_json::Value as JsonValue;
use wasm_bindgen::JsValue;

pub const BASE: &str = ""; // use same-origin relative URLs

/// [`FileGateway`] over `fetch`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpGateway {
    base: String,
}

impl HttpGateway {
    pub fn new() -> Self {
        Self { base: BASE.to_string() }
    }

    fn request(&self, endpoint: &Endpoint) -> Request {
        let method = match endpoint.method {
            Method::Get => reqwasm::http::Method::GET,
            Method::Post => reqwasm::http::Method::POST,
            Method::Patch => reqwasm::http::Method::PATCH,
            Method::Delete => reqwasm::http::Method::DELETE,
        };
        Request::new(&endpoint.url(&self.base)).method(method)
    }

    pub async fn list_buildings(&self) -> ClientResult<Vec<Building>> {
        let resp = self.request(&Endpoint::list_buildings()).send().await.map_err(map_net)?;
        if !resp.ok() {
            return Err(ClientError::Transport(error_text(resp).await));
        }
        resp.json().await.map_err(map_net)
    }

    pub async fn settings(&self) -> ClientResult<ClientSettings> {
        let resp = self.request(&Endpoint::settings()).send().await.map_err(map_net)?;
        if !resp.ok() {
            return Err(ClientError::Transport(error_text(resp).await));
        }
        resp.json().await.map_err(map_net)
    }
}

#[async_trait(?Send)]
impl FileGateway for HttpGateway {
    async fn list_files(&self, building_id: BuildingId) -> ClientResult<Vec<FileRecord>> {
        let resp = self.request(&Endpoint::list_files(building_id)).send().await.map_err(map_net)?;
        if !resp.ok() {
            return Err(ClientError::Transport(error_text(resp).await));
        }
        resp.json().await.map_err(map_net)
    }

    async fn rename_file(&self, file_id: FileId, new_name: &str) -> ClientResult<()> {
        let body = serde_json::to_string(&RenameRequest { contents: new_name.to_string() })
            .map_err(|e| ClientError::RenameFailed(e.to_string()))?;
        let resp = self
            .request(&Endpoint::rename_file(file_id))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::RenameFailed(e.to_string()))?;
        if !resp.ok() {
            return Err(ClientError::RenameFailed(error_text(resp).await));
        }
        Ok(())
    }

    async fn delete_file(&self, file_id: FileId) -> ClientResult<()> {
        let resp = self.request(&Endpoint::delete_file(file_id)).send().await.map_err(map_net)?;
        // Only a plain 200 counts as deleted.
        if resp.status() != 200 {
            return Err(ClientError::DeletionFailed { status: resp.status() });
        }
        Ok(())
    }

    async fn create_building(&self, building: &NewBuilding) -> ClientResult<Building> {
        let body = serde_json::to_string(building).map_err(|e| ClientError::CreateFailed(e.to_string()))?;
        let resp = self
            .request(&Endpoint::create_building())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::CreateFailed(e.to_string()))?;
        if !resp.ok() {
            return Err(ClientError::CreateFailed(error_text(resp).await));
        }
        resp.json().await.map_err(|e| ClientError::CreateFailed(e.to_string()))
    }

    async fn upload_file(&self, payload: UploadPayload) -> ClientResult<UploadReceipt> {
        let form = multipart_form(&payload).map_err(|e| ClientError::UploadFailed(format!("{:?}", e)))?;
        // No Content-Type header: the browser sets the multipart boundary itself.
        let resp = self
            .request(&Endpoint::upload())
            .body(form)
            .send()
            .await
            .map_err(|e| ClientError::UploadFailed(e.to_string()))?;
        if !resp.ok() {
            return Err(ClientError::UploadFailed(error_text(resp).await));
        }
        resp.json().await.map_err(|e| ClientError::UploadFailed(e.to_string()))
    }
}

fn multipart_form(payload: &UploadPayload) -> Result<web_sys::FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(payload.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    if let Some(content_type) = &payload.content_type {
        options.set_type(content_type);
    }
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let form = web_sys::FormData::new()?;
    form.append_with_blob_and_filename(routes::UPLOAD_FIELD, &blob, &payload.file_name)?;
    if let Some(building_id) = payload.building_id {
        form.append_with_str("buildingId", &building_id.to_string())?;
    }
    Ok(form)
}

// Prefer the message of the server's error envelope over the raw body.
async fn error_text(resp: Response) -> String {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    if let Ok(v) = serde_json::from_str::<JsonValue>(&text) {
        if let Some(msg) = v.get("error").and_then(|e| e.get("message")).and_then(|m| m.as_str()) {
            return format!("HTTP {}: {}", status, msg);
        }
    }
    if text.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, text)
    }
}

fn map_net(e: reqwasm::Error) -> ClientError {
    ClientError::Transport(format!("Network error: {}", e))
}
