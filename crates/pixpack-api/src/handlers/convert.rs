//! Batch image conversion endpoint

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    http::{header, StatusCode},
    response::Response,
};
use pixpack_core::{AppError, ConversionOptions};
use pixpack_processing::convert_to_archive;

use crate::constants::{ARCHIVE_CONTENT_TYPE, ARCHIVE_FILE_NAME};
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::{extract_conversion_form, multipart_rejection};

/// Convert every uploaded image to the requested format and return them as a
/// ZIP attachment.
///
/// Form fields: `options` (JSON `{format, quality, lossless, speed}`) and one
/// or more `files` parts. The whole batch fails on the first file that cannot
/// be converted.
#[tracing::instrument(skip(state, multipart))]
pub async fn convert_images(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let multipart = multipart.map_err(multipart_rejection)?;
    let form = extract_conversion_form(multipart).await?;

    let options = ConversionOptions::from_json(form.options.as_deref().unwrap_or_default())?;

    if form.files.is_empty() {
        return Err(AppError::InvalidInput("No files uploaded".to_string()).into());
    }

    let file_count = form.files.len();
    tracing::info!(
        files = file_count,
        format = %options.format(),
        quality = options.quality(),
        lossless = options.lossless(),
        "Starting conversion"
    );

    // The workspace is created and dropped inside the blocking task, so it is
    // cleaned up even if this request future is dropped mid-conversion.
    let workspace_root = state.config.workspace_dir().map(PathBuf::from);
    let files = form.files;
    let archive = tokio::task::spawn_blocking(move || {
        convert_to_archive(&files, &options, workspace_root.as_deref())
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Conversion task failed to complete");
        HttpAppError(AppError::Internal(format!("conversion task failed: {}", e)))
    })??;

    tracing::info!(
        files = file_count,
        archive_bytes = archive.len(),
        "Conversion complete"
    );

    let content_length = archive.len();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, ARCHIVE_CONTENT_TYPE)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", ARCHIVE_FILE_NAME),
        )
        .header(header::CONTENT_LENGTH, content_length)
        .body(Body::from(archive.bytes))
        .map_err(|e| HttpAppError(AppError::Internal(format!("failed to build response: {}", e))))
}
