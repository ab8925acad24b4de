//! Validation modules

pub mod filename;

pub use filename::{output_file_name, sanitize_filename, UNNAMED_FILE};
