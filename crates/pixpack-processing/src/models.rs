//! Request-scoped file types

use std::path::PathBuf;

use bytes::Bytes;

/// One image received in the upload, held in memory for the request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_filename: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(original_filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            original_filename: original_filename.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A converted file written inside the staging workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedOutput {
    pub path: PathBuf,
    /// Base name used as the archive entry
    pub file_name: String,
    pub size_bytes: u64,
}
