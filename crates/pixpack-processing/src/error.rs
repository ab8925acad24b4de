//! Processing error types

use std::io;

use pixpack_core::TargetFormat;

/// Failure of a codec adapter to produce encoded bytes
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("cannot encode an empty image ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("{format} encoder failed: {message}")]
    Encoder {
        format: TargetFormat,
        message: String,
    },
}

/// Failure while packaging staged outputs into a ZIP archive
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to read staged file {entry}: {source}")]
    Read {
        entry: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to add {entry} to archive: {source}")]
    AddEntry {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to write {entry} to archive: {source}")]
    Write {
        entry: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to finalize archive: {0}")]
    Finalize(#[source] zip::result::ZipError),
}

/// Error type for the conversion pipeline
///
/// Messages never contain host paths: filesystem failures render a short
/// context string and the error kind. The full source stays in the chain.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("{0}")]
    Validation(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("{context}: {}", .source.kind())]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

impl ProcessingError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        ProcessingError::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether the client caused the failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProcessingError::Validation(_))
    }
}
