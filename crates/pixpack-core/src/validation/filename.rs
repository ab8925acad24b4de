//! Filename sanitization for user-supplied upload names

use crate::models::TargetFormat;

/// Name used when nothing usable remains after sanitization
pub const UNNAMED_FILE: &str = "unnamed";

const UNSAFE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Reduce a client-supplied filename to a safe single path component.
///
/// Only the final component survives (both `/` and `\` count as separators),
/// unsafe and control characters become `_`, and empty, `.` or `..` results
/// become [`UNNAMED_FILE`]. Applying it twice yields the same result.
pub fn sanitize_filename(name: &str) -> String {
    let component = name
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .last()
        .unwrap_or("");

    let sanitized: String = component
        .chars()
        .map(|c| {
            if UNSAFE_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    match sanitized.as_str() {
        "" | "." | ".." => UNNAMED_FILE.to_string(),
        _ => sanitized,
    }
}

/// Name of the converted file for `original`: sanitized, final extension
/// replaced by the target format's extension.
pub fn output_file_name(original: &str, format: TargetFormat) -> String {
    let sanitized = sanitize_filename(original);
    let stem = match sanitized.rfind('.') {
        Some(0) | None => sanitized.as_str(),
        Some(idx) => &sanitized[..idx],
    };
    format!("{}.{}", stem, format.extension())
}
