//! Per-request conversion pipeline
//!
//! validate → allocate workspace → convert batch → build archive → release workspace

use std::path::Path;
use std::time::Instant;

use pixpack_core::ConversionOptions;

use crate::archive::{build_zip_archive, ArchiveBuffer};
use crate::batch::BatchProcessor;
use crate::error::ProcessingError;
use crate::models::UploadedFile;
use crate::workspace::StagingWorkspace;

/// Convert `files` and return them as one ZIP archive.
///
/// Blocking and CPU-bound. The staging workspace lives for the duration of
/// this call only and is removed on every exit path.
pub fn convert_to_archive(
    files: &[UploadedFile],
    options: &ConversionOptions,
    workspace_root: Option<&Path>,
) -> Result<ArchiveBuffer, ProcessingError> {
    if files.is_empty() {
        return Err(ProcessingError::Validation("No files uploaded".to_string()));
    }

    let start = Instant::now();
    let workspace = StagingWorkspace::create(workspace_root)?;

    let outputs = BatchProcessor::new(options).run(files, &workspace)?;
    let archive = build_zip_archive(&outputs)?;

    if let Err(e) = workspace.close() {
        tracing::warn!(error = %e, "Failed to remove staging workspace");
    }

    tracing::info!(
        files = files.len(),
        archive_kb = archive.len() / 1024,
        duration_ms = start.elapsed().as_millis() as u64,
        "Conversion pipeline finished"
    );

    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use pixpack_core::TargetFormat;
    use std::io::Cursor;

    fn png_file(name: &str) -> UploadedFile {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 6, Rgba([1, 2, 3, 128])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        UploadedFile::new(name, buf)
    }

    fn workspace_count(root: &Path) -> usize {
        std::fs::read_dir(root).unwrap().count()
    }

    #[test]
    fn test_convert_to_archive_success() {
        let root = tempfile::tempdir().unwrap();
        let options = ConversionOptions::new(TargetFormat::WebP, 80.0, false, None).unwrap();
        let files = vec![png_file("one.png"), png_file("two.png")];

        let archive = convert_to_archive(&files, &options, Some(root.path())).unwrap();

        assert_eq!(archive.entries, vec!["one.webp", "two.webp"]);
        assert_eq!(workspace_count(root.path()), 0);
    }

    #[test]
    fn test_empty_input_creates_no_workspace() {
        let root = tempfile::tempdir().unwrap();
        let err = convert_to_archive(&[], &ConversionOptions::default(), Some(root.path()))
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(workspace_count(root.path()), 0);
    }

    #[test]
    fn test_failure_removes_workspace() {
        let root = tempfile::tempdir().unwrap();
        let files = vec![
            png_file("ok.png"),
            UploadedFile::new("corrupt.png", b"\x89PNG\r\n\x1a\n garbage".to_vec()),
        ];

        let err = convert_to_archive(&files, &ConversionOptions::default(), Some(root.path()))
            .unwrap_err();

        assert!(matches!(err, ProcessingError::Decode(_)));
        assert_eq!(workspace_count(root.path()), 0);
    }
}
