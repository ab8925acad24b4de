//! Pixpack API Library
//!
//! This crate provides the HTTP handlers and application setup of the image
//! conversion service.

pub mod constants;
pub mod error;
mod handlers;
pub mod setup;
pub mod state;
mod utils;

// Re-exports
pub use error::HttpAppError;
pub use state::AppState;
