//! Data models for the application
//!
//! Request-scoped value types shared between the HTTP boundary and the
//! processing pipeline.

mod conversion;

pub use conversion::*;
