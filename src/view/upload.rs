//! Raw upload widget: pick a file, send it, show whatever JSON comes back.

use tracing::{error, info};

use crate::error::{ClientError, ClientResult};
use crate::gateway::FileGateway;
use crate::types::{UploadPayload, UploadReceipt};

pub const MSG_UPLOADED: &str = "File uploaded successfully!";
pub const MSG_UPLOAD_FAILED: &str = "Failed to upload file.";
pub const MSG_NO_FILE: &str = "Please choose a file first.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    file: Option<UploadPayload>,
    message: String,
    receipt: Option<UploadReceipt>,
    in_progress: bool,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choose(&mut self, file: UploadPayload) {
        self.file = Some(file);
    }

    pub fn file(&self) -> Option<&UploadPayload> {
        self.file.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn receipt(&self) -> Option<&UploadReceipt> {
        self.receipt.as_ref()
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// The receipt pretty-printed with two-space indentation.
    pub fn receipt_pretty(&self) -> Option<String> {
        self.receipt.as_ref().and_then(|r| serde_json::to_string_pretty(r).ok())
    }

    /// Takes the chosen file for sending. Without one the user gets a message and
    /// nothing is sent.
    pub fn start(&mut self) -> ClientResult<UploadPayload> {
        if self.in_progress {
            return Err(ClientError::Busy);
        }
        match self.file.clone() {
            Some(file) => {
                self.in_progress = true;
                Ok(file)
            }
            None => {
                self.message = MSG_NO_FILE.to_string();
                Err(ClientError::validation("file", MSG_NO_FILE))
            }
        }
    }

    /// Records the outcome of a send started with [`UploadForm::start`].
    pub fn finish(&mut self, outcome: ClientResult<UploadReceipt>) -> ClientResult<()> {
        self.in_progress = false;
        match outcome {
            Ok(receipt) => {
                info!("file uploaded");
                self.message = MSG_UPLOADED.to_string();
                self.receipt = Some(receipt);
                Ok(())
            }
            Err(e) => {
                error!("There was an error uploading the file: {}", e);
                self.message = MSG_UPLOAD_FAILED.to_string();
                Err(e)
            }
        }
    }

    /// `start`, send, `finish` in one go.
    pub async fn upload<G: FileGateway>(&mut self, gateway: &G) -> ClientResult<()> {
        let payload = self.start()?;
        let outcome = gateway.upload_file(payload).await;
        self.finish(outcome)
    }
}
