#[cfg(test)]
mod tests {
    use crate::error::ClientError;

    #[test]
    fn test_client_error_display() {
        let error = ClientError::validation("fileName", "Please enter a file name.");
        assert_eq!(format!("{}", error), "Validation error on field 'fileName': Please enter a file name.");

        let error = ClientError::DeletionFailed { status: 500 };
        assert_eq!(format!("{}", error), "Deletion failed with status 500");

        let error = ClientError::Transport("HTTP 503".to_string());
        assert_eq!(format!("{}", error), "Transport error: HTTP 503");
    }

    #[test]
    fn test_is_validation() {
        assert!(ClientError::validation("address", "required").is_validation());
        assert!(!ClientError::Busy.is_validation());
        assert!(!ClientError::Cancelled.is_validation());
    }

    #[cfg(feature = "devserver")]
    #[test]
    fn test_api_error_into_response() {
        use crate::error::ApiError;
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let response = ApiError::NotFound("File 3 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::ValidationError { field: "contents".into(), message: "empty".into() }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::PayloadTooLarge("too big".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = ApiError::from(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
