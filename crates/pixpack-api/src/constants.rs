//! HTTP-facing constants

/// Filename offered to the client for the converted archive
pub const ARCHIVE_FILE_NAME: &str = "converted_images.zip";

pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// Multipart field carrying the JSON conversion options
pub const OPTIONS_FIELD: &str = "options";

/// Multipart field carrying the uploaded images (repeated)
pub const FILES_FIELD: &str = "files";

pub const HEALTH_MESSAGE: &str = "Image Converter API is running";

/// Response header carrying the machine-readable error code
pub const ERROR_CODE_HEADER: &str = "X-Error-Code";
