//! Single-file conversion: decode, encode, stage

use std::io::{BufRead, Seek, Write};
use std::path::Path;
use std::time::Instant;

use image::{GenericImageView, ImageReader};
use pixpack_core::ConversionOptions;

use crate::codec::FormatCodecExt;
use crate::error::ProcessingError;
use crate::models::StagedOutput;

/// Prefix of the temporary file an output is written to before it is renamed
/// into place.
const PARTIAL_FILE_PREFIX: &str = ".partial-";

/// Decode one image from `reader`, encode it to the requested format and
/// write the result to `dest`.
///
/// The encoded bytes go to a temporary file next to `dest` that is renamed
/// over `dest` only once fully written, so a failure never leaves a partial
/// file behind.
pub fn convert_image<R: BufRead + Seek>(
    reader: R,
    options: &ConversionOptions,
    dest: &Path,
) -> Result<StagedOutput, ProcessingError> {
    let total_start = Instant::now();

    let decode_start = Instant::now();
    let image = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| ProcessingError::io("failed to read upload", e))?
        .decode()?;
    let decode_duration = decode_start.elapsed();

    let (width, height) = image.dimensions();

    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut partial = tempfile::Builder::new()
        .prefix(PARTIAL_FILE_PREFIX)
        .tempfile_in(dir)
        .map_err(|e| ProcessingError::io("failed to create output file", e))?;

    let adapter = options.format().adapter();
    let plan = adapter.plan(options);

    let encode_start = Instant::now();
    let encoded = adapter.encode(&image, &plan)?;
    let encode_duration = encode_start.elapsed();

    partial
        .write_all(&encoded)
        .map_err(|e| ProcessingError::io("failed to write output file", e))?;
    partial
        .persist(dest)
        .map_err(|e| ProcessingError::io("failed to save output file", e.error))?;

    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let size_bytes = encoded.len() as u64;

    tracing::debug!(
        file_name = %file_name,
        width = width,
        height = height,
        format = %adapter.format(),
        plan = ?plan,
        size_kb = size_bytes / 1024,
        decode_ms = decode_duration.as_millis() as u64,
        encode_ms = encode_duration.as_millis() as u64,
        total_ms = total_start.elapsed().as_millis() as u64,
        "Image converted"
    );

    Ok(StagedOutput {
        path: dest.to_path_buf(),
        file_name,
        size_bytes,
    })
}
