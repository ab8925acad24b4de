//! Request-scoped staging directory

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::ProcessingError;

const WORKSPACE_PREFIX: &str = "image-convert-";

/// Temporary directory holding the converted files of one request.
///
/// The directory and everything in it is removed when the workspace is
/// dropped, including when the owning task is abandoned part way through.
#[derive(Debug)]
pub struct StagingWorkspace {
    dir: TempDir,
}

impl StagingWorkspace {
    /// Create a fresh workspace under `root`, or under the system temp
    /// directory when no root is configured.
    pub fn create(root: Option<&Path>) -> Result<Self, ProcessingError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);

        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| ProcessingError::io("failed to create temp directory", e))?;

        tracing::debug!(workspace = %dir.path().display(), "Staging workspace created");

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a file named `file_name` inside the workspace
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }

    /// Remove the workspace now, reporting failures instead of ignoring them.
    pub fn close(self) -> Result<(), ProcessingError> {
        self.dir
            .close()
            .map_err(|e| ProcessingError::io("failed to remove temp directory", e))
    }
}
