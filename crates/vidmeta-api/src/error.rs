//! HTTP error response conversion
//!
//! This module renders every `AppError` as the uniform JSON envelope
//! `{ timestamp, status, error, message }`.
//!
//! **Handler pattern:** Return `Result<impl IntoResponse, HttpAppError>` and let
//! `?` convert domain errors (`ExtractionError`, `StorageError`, multipart
//! failures) through the `From` impls below.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use vidmeta_core::{AppError, ErrorMetadata, LogLevel};
use vidmeta_processing::ExtractionError;
use vidmeta_storage::StorageError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// RFC 3339 time the error was produced
    pub timestamp: String,
    /// HTTP status code, repeated from the response line
    pub status: u16,
    /// Reason phrase of the status (e.g. "Bad Request")
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.into(),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from vidmeta-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, error_code, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, error_code, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type, error_code, "Error occurred");
        }
    }
}

/// Internal details of a sensitive error, attached to its response.
///
/// The envelope itself carries the client message; the error detail layer
/// swaps these details in when the service is not running in production.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

/// Message shown to the client. Sensitive errors keep their details out of production.
pub(crate) fn response_message(error: &AppError, is_production: bool) -> String {
    if error.is_sensitive() && !is_production {
        error.detailed_message()
    } else {
        error.client_message()
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = ErrorResponse::new(status, response_message(app_error, true));
        let mut response = (status, Json(body)).into_response();
        if app_error.is_sensitive() {
            response
                .extensions_mut()
                .insert(ErrorDetail(response_message(app_error, false)));
        }
        response
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<ExtractionError> for HttpAppError {
    fn from(err: ExtractionError) -> Self {
        let message = err.to_string();
        let app = match err {
            ExtractionError::NotFound(_) => AppError::NotFound(message),
            ExtractionError::ParseFailed(_) => AppError::ParseFailed(message),
            ExtractionError::ExtractionFailed(_) => AppError::ExtractionFailed(message),
            ExtractionError::InvalidConfiguration(_) => AppError::Internal(message),
        };
        HttpAppError(app)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(AppError::PersistenceFailed(err.to_string()))
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        let app = if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
        };
        HttpAppError(app)
    }
}

/// Requests that are not multipart at all are answered with the envelope too.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError(AppError::InvalidInput(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extraction_error_not_found() {
        let err = ExtractionError::NotFound("/tmp/missing.mp4".to_string());
        let HttpAppError(app_err) = err.into();
        match app_err {
            AppError::NotFound(msg) => assert_eq!(msg, "Video file not found: /tmp/missing.mp4"),
            other => panic!("Expected NotFound variant, got {:?}", other),
        }
    }

    #[test]
    fn test_from_extraction_error_parse_failed() {
        let err = ExtractionError::ParseFailed("expected value at line 1 column 1".to_string());
        let HttpAppError(app_err) = err.into();
        assert_eq!(app_err.http_status_code(), 400);
        assert!(app_err
            .to_string()
            .starts_with("Failed to parse metadata: expected value"));
    }

    #[test]
    fn test_from_extraction_error_failed_is_server_error() {
        let err = ExtractionError::ExtractionFailed("No such file or directory".to_string());
        let HttpAppError(app_err) = err.into();
        assert_eq!(app_err.http_status_code(), 500);
        assert_eq!(app_err.error_type(), "ExtractionFailed");
    }

    #[test]
    fn test_from_storage_error_write_failed() {
        let err = StorageError::WriteFailed("disk full".to_string());
        let HttpAppError(app_err) = err.into();
        match app_err {
            AppError::PersistenceFailed(msg) => assert!(msg.contains("disk full")),
            other => panic!("Expected PersistenceFailed variant, got {:?}", other),
        }
    }

    #[test]
    fn test_from_storage_error_directory_creation() {
        let err = StorageError::DirectoryCreation {
            path: "/readonly/metadata".to_string(),
            message: "Permission denied".to_string(),
        };
        let HttpAppError(app_err) = err.into();
        assert_eq!(app_err.http_status_code(), 500);
        assert_eq!(app_err.client_message(), "Failed to save metadata");
    }

    #[test]
    fn test_response_message_hides_sensitive_details_in_production() {
        let err = AppError::ExtractionFailed(
            "Error during video metadata extraction: spawn failed".to_string(),
        );
        assert_eq!(
            response_message(&err, false),
            "Error during video metadata extraction: spawn failed"
        );
        assert_eq!(
            response_message(&err, true),
            "Failed to extract video metadata"
        );

        let not_found = AppError::NotFound("Video file not found: /tmp/x.mp4".to_string());
        assert_eq!(
            response_message(&not_found, true),
            "Video file not found: /tmp/x.mp4"
        );
    }

    #[test]
    fn test_sensitive_error_response_is_redacted_with_detail_attached() {
        let err = HttpAppError(AppError::PersistenceFailed(
            "Failed to write metadata file: disk full".to_string(),
        ));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = response.extensions().get::<ErrorDetail>().unwrap();
        assert!(detail.0.contains("disk full"));
    }

    #[test]
    fn test_client_error_response_has_no_detail() {
        let err = HttpAppError(AppError::InvalidInput("No file provided".to_string()));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.extensions().get::<ErrorDetail>().is_none());
    }

    /// The public envelope always carries exactly these four keys.
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse::new(StatusCode::NOT_FOUND, "Video file not found: /x");
        let json = serde_json::to_value(&response).expect("serialize");
        let object = json.as_object().expect("object");

        assert_eq!(object.len(), 4);
        assert_eq!(json["status"], 404);
        assert_eq!(json["error"], "Not Found");
        assert_eq!(json["message"], "Video file not found: /x");
        assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
    }
}
