//! Multipart extraction for conversion requests

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::http::StatusCode;
use pixpack_core::AppError;
use pixpack_processing::UploadedFile;

use crate::constants::{FILES_FIELD, OPTIONS_FIELD};

/// Raw contents of a conversion form
#[derive(Debug, Default)]
pub struct ConversionForm {
    /// JSON text of the `options` field, if sent
    pub options: Option<String>,
    /// Every `files` part, in the order received
    pub files: Vec<UploadedFile>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body exceeds the maximum upload size".to_string())
    } else {
        AppError::InvalidInput(format!("Unable to parse form: {}", err.body_text()))
    }
}

/// Map a rejected multipart extractor (wrong content type, missing boundary)
/// to a client error.
pub fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    AppError::InvalidInput(format!("Unable to parse form: {}", rejection.body_text()))
}

/// Read the `options` field and all `files` parts. Other fields are skipped.
/// A repeated `options` field keeps the last value.
pub async fn extract_conversion_form(mut multipart: Multipart) -> Result<ConversionForm, AppError> {
    let mut form = ConversionForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            OPTIONS_FIELD => {
                form.options = Some(field.text().await.map_err(multipart_error)?);
            }
            FILES_FIELD => {
                let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
                let data = field.bytes().await.map_err(multipart_error)?;

                tracing::debug!(filename = %filename, size = data.len(), "Received file part");
                form.files.push(UploadedFile::new(filename, data));
            }
            _ => {
                tracing::debug!(field = %field_name, "Ignoring unknown form field");
            }
        }
    }

    Ok(form)
}
