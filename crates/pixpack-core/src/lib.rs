//! Pixpack Core Library
//!
//! This crate provides the conversion request model, error types, configuration and
//! filename validation shared by the processing pipeline and the HTTP API.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ConversionOptions, TargetFormat};
pub use validation::{output_file_name, sanitize_filename};
