//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Every error renders as a plain-text
//! body with the client message, the status from [`ErrorMetadata`] and an
//! `X-Error-Code` header, and is logged at the level the error declares.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use pixpack_core::{AppError, ErrorMetadata, LogLevel};
use pixpack_processing::ProcessingError;

use crate::constants::ERROR_CODE_HEADER;

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from pixpack-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

/// Convert pipeline errors to HTTP errors
impl From<ProcessingError> for HttpAppError {
    fn from(err: ProcessingError) -> Self {
        let message = err.to_string();
        let app_error = match err {
            ProcessingError::Validation(_) => AppError::InvalidInput(message),
            ProcessingError::Decode(_) => AppError::ImageDecode(message),
            ProcessingError::Encode(_) => AppError::ImageEncode(message),
            ProcessingError::Io { .. } => AppError::Io(message),
            ProcessingError::Archive(_) => AppError::Archive(message),
        };
        HttpAppError(app_error)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error,
                error_type = error_type,
                details = %error.detailed_message(),
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let mut response = (status, app_error.client_message()).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response.headers_mut().insert(
            ERROR_CODE_HEADER,
            HeaderValue::from_static(app_error.error_code()),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixpack_processing::{ArchiveError, EncodeError};
    use std::io;

    #[test]
    fn test_from_processing_validation() {
        let err = HttpAppError::from(ProcessingError::Validation("No files uploaded".to_string()));
        assert_eq!(err.0.http_status_code(), 400);
        assert_eq!(err.0.client_message(), "No files uploaded");
    }

    #[test]
    fn test_from_processing_encode() {
        let err = HttpAppError::from(ProcessingError::Encode(EncodeError::EmptyImage {
            width: 0,
            height: 0,
        }));
        assert_eq!(err.0.http_status_code(), 500);
        assert_eq!(err.0.error_code(), "IMAGE_ENCODE_ERROR");
        assert!(err.0.client_message().starts_with("Error processing file: "));
    }

    #[test]
    fn test_from_processing_io_hides_paths() {
        let err = HttpAppError::from(ProcessingError::Io {
            context: "failed to create temp directory".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing /srv/secret/tmp"),
        });
        let message = err.0.client_message();
        assert!(message.starts_with("Error processing file: failed to create temp directory"));
        assert!(!message.contains("/srv/secret"));
    }

    #[test]
    fn test_from_processing_archive() {
        let err = HttpAppError::from(ProcessingError::Archive(ArchiveError::Read {
            entry: "a.webp".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        }));
        assert_eq!(err.0.error_code(), "ARCHIVE_ERROR");
        assert!(err.0.client_message().starts_with("Failed to create zip file: "));
    }

    #[test]
    fn test_into_response_is_plain_text() {
        let response =
            HttpAppError(AppError::InvalidInput("No files uploaded".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.headers().get(ERROR_CODE_HEADER).unwrap(),
            "INVALID_INPUT"
        );
    }
}
