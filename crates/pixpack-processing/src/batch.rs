//! Batch conversion of all files in a request

use std::collections::HashSet;
use std::io::Cursor;
use std::time::Instant;

use pixpack_core::{output_file_name, ConversionOptions};

use crate::convert::convert_image;
use crate::error::ProcessingError;
use crate::models::{StagedOutput, UploadedFile};
use crate::workspace::StagingWorkspace;

/// Converts every uploaded file with one set of options.
///
/// Fail-fast: the first file that cannot be converted aborts the batch and its
/// error is returned as is. Outputs already staged stay in the workspace until
/// it is dropped.
pub struct BatchProcessor<'a> {
    options: &'a ConversionOptions,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(options: &'a ConversionOptions) -> Self {
        Self { options }
    }

    pub fn run(
        &self,
        files: &[UploadedFile],
        workspace: &StagingWorkspace,
    ) -> Result<Vec<StagedOutput>, ProcessingError> {
        if files.is_empty() {
            return Err(ProcessingError::Validation("No files uploaded".to_string()));
        }

        let span = tracing::info_span!(
            "batch",
            files = files.len(),
            format = %self.options.format(),
            lossless = self.options.lossless()
        );
        let _enter = span.enter();
        let start = Instant::now();

        let mut used_names = HashSet::with_capacity(files.len());
        let mut outputs = Vec::with_capacity(files.len());

        for (index, file) in files.iter().enumerate() {
            let base_name = output_file_name(&file.original_filename, self.options.format());
            let file_name = unique_name(&base_name, &used_names);
            used_names.insert(file_name.to_lowercase());

            let dest = workspace.file_path(&file_name);
            let output = convert_image(Cursor::new(file.data.as_ref()), self.options, &dest)
                .inspect_err(|e| {
                    tracing::warn!(
                        index = index,
                        original_filename = %file.original_filename,
                        error = %e,
                        "Conversion failed, aborting batch"
                    );
                })?;

            tracing::info!(
                index = index,
                total = files.len(),
                file_name = %output.file_name,
                input_bytes = file.size(),
                output_bytes = output.size_bytes,
                "File converted"
            );
            outputs.push(output);
        }

        tracing::info!(
            converted = outputs.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch complete"
        );

        Ok(outputs)
    }
}

/// `name` if unused, otherwise `stem_2.ext`, `stem_3.ext`, ...
///
/// `used` holds lowercased names: `A.webp` and `a.webp` are the same file on a
/// case-insensitive filesystem.
fn unique_name(name: &str, used: &HashSet<String>) -> String {
    let is_used = |candidate: &str| used.contains(&candidate.to_lowercase());
    if !is_used(name) {
        return name.to_string();
    }

    let (stem, ext) = match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    };

    (2..)
        .map(|n| format!("{}_{}{}", stem, n, ext))
        .find(|candidate| !is_used(candidate.as_str()))
        .unwrap_or_else(|| name.to_string())
}
