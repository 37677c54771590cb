use thiserror::Error;

/// The error type of the client-side core.
///
/// Every failure a screen can run into is one of these. Validation errors are raised
/// before any network call; the mutation failures are raised after the backend answered
/// with something other than success. None of them leave a partially applied local change
/// behind.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// A required field is empty or a value is out of range.
    #[error("Validation error on field '{field}': {message}")]
    Validation {
        /// The name of the offending field.
        field: String,
        /// A message suitable for showing next to the field.
        message: String,
    },
    /// The backend could not be reached or answered a read with an error status.
    #[error("Transport error: {0}")]
    Transport(String),
    /// `DELETE /files/{id}` answered with anything but 200.
    #[error("Deletion failed with status {status}")]
    DeletionFailed { status: u16 },
    /// `PATCH /files/{id}` failed.
    #[error("Rename failed: {0}")]
    RenameFailed(String),
    /// `POST /buildings` failed.
    #[error("Creating the building failed: {0}")]
    CreateFailed(String),
    /// `POST /upload` failed.
    #[error("Upload failed: {0}")]
    UploadFailed(String),
    /// Another mutation is still in flight.
    #[error("Another operation is still in progress")]
    Busy,
    /// The view was torn down while the request was outstanding.
    #[error("Operation cancelled")]
    Cancelled,
}

impl ClientError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ClientError::Validation { field: field.to_string(), message: message.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }
}

/// A type alias for `Result<T, ClientError>`.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(feature = "devserver")]
pub use api::{ApiError, ApiResult};

/// Error envelope of the development server.
#[cfg(feature = "devserver")]
mod api {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use serde_json::json;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum ApiError {
        /// For internal server errors that are not expected to be handled by the client.
        #[error("Internal error: {0}")]
        Internal(anyhow::Error),
        #[error("Bad request: {0}")]
        BadRequest(String),
        #[error("Not found: {0}")]
        NotFound(String),
        #[error("Payload too large: {0}")]
        PayloadTooLarge(String),
        /// For when a specific field in a request fails validation.
        #[error("Validation error on field '{field}': {message}")]
        ValidationError { field: String, message: String },
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let (status, error_code, error_message, details) = match self {
                ApiError::Internal(e) => {
                    let error_id = uuid::Uuid::new_v4();
                    tracing::error!(%error_id, "Internal error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal server error occurred".to_string(),
                        Some(json!({ "error_id": error_id.to_string() })),
                    )
                }
                ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
                ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
                ApiError::PayloadTooLarge(msg) => {
                    (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg, None)
                }
                ApiError::ValidationError { field, message } => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Validation failed for field '{}'", field),
                    Some(json!({ "field": field, "message": message })),
                ),
            };

            let mut body = json!({
                "error": {
                    "code": error_code,
                    "message": error_message,
                },
                "status": status.as_u16(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            });

            if let Some(details) = details {
                body["error"]["details"] = details;
            }

            (status, Json(body)).into_response()
        }
    }

    impl From<anyhow::Error> for ApiError {
        fn from(err: anyhow::Error) -> Self {
            ApiError::Internal(err)
        }
    }

    pub type ApiResult<T> = Result<T, ApiError>;
}
