//! ZIP packaging of staged outputs

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use pixpack_core::validation::UNNAMED_FILE;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::ArchiveError;
use crate::models::StagedOutput;

/// Archive bytes ready to be sent, with the entry names in archive order
#[derive(Debug, Clone)]
pub struct ArchiveBuffer {
    pub bytes: Vec<u8>,
    pub entries: Vec<String>,
}

impl ArchiveBuffer {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Entry name for a staged file: only the base name, never a directory part.
fn archive_entry_name(path: &Path, fallback: &str) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or(fallback)
        .to_string()
}

/// Build an in-memory, deflate-compressed ZIP of `outputs` in the given order.
pub fn build_zip_archive(outputs: &[StagedOutput]) -> Result<ArchiveBuffer, ArchiveError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut entries = Vec::with_capacity(outputs.len());

    for output in outputs {
        let fallback = if output.file_name.is_empty() {
            UNNAMED_FILE
        } else {
            output.file_name.as_str()
        };
        let entry = archive_entry_name(&output.path, fallback);

        let mut file = File::open(&output.path).map_err(|source| ArchiveError::Read {
            entry: entry.clone(),
            source,
        })?;

        zip.start_file(entry.as_str(), options)
            .map_err(|source| ArchiveError::AddEntry {
                entry: entry.clone(),
                source,
            })?;
        std::io::copy(&mut file, &mut zip).map_err(|source| ArchiveError::Write {
            entry: entry.clone(),
            source,
        })?;

        entries.push(entry);
    }

    let bytes = zip.finish().map_err(ArchiveError::Finalize)?.into_inner();

    tracing::debug!(
        entries = entries.len(),
        size_kb = bytes.len() / 1024,
        "ZIP archive built"
    );

    Ok(ArchiveBuffer { bytes, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn stage(dir: &Path, name: &str, contents: &[u8]) -> StagedOutput {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        StagedOutput {
            path,
            file_name: name.to_string(),
            size_bytes: contents.len() as u64,
        }
    }

    #[test]
    fn test_archive_entry_name() {
        assert_eq!(
            archive_entry_name(Path::new("/tmp/ws/photo.webp"), "fallback"),
            "photo.webp"
        );
        assert_eq!(archive_entry_name(Path::new("/tmp/ws/.."), "fallback"), "fallback");
        assert_eq!(archive_entry_name(Path::new(""), "fallback"), "fallback");
    }

    #[test]
    fn test_build_zip_archive_preserves_order_and_contents() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = vec![
            stage(dir.path(), "b.webp", b"second-file"),
            stage(dir.path(), "a.webp", b"first-file"),
        ];

        let archive = build_zip_archive(&outputs).unwrap();
        assert_eq!(archive.entries, vec!["b.webp", "a.webp"]);
        assert!(!archive.is_empty());

        let mut zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        assert_eq!(zip.len(), 2);

        let mut entry = zip.by_index(0).unwrap();
        assert_eq!(entry.name(), "b.webp");
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"second-file");
    }

    #[test]
    fn test_entry_names_have_no_directories() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = vec![stage(dir.path(), "x.avif", b"x")];

        let archive = build_zip_archive(&outputs).unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        let entry = zip.by_index(0).unwrap();
        assert!(!entry.name().contains('/'));
        assert!(!entry.name().contains('\\'));
    }

    #[test]
    fn test_missing_staged_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let outputs = vec![StagedOutput {
            path: dir.path().join("gone.webp"),
            file_name: "gone.webp".to_string(),
            size_bytes: 0,
        }];

        match build_zip_archive(&outputs) {
            Err(ArchiveError::Read { entry, .. }) => assert_eq!(entry, "gone.webp"),
            other => panic!("Expected Read error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_archive_is_valid_zip() {
        let archive = build_zip_archive(&[]).unwrap();
        let zip = zip::ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        assert_eq!(zip.len(), 0);
    }
}
