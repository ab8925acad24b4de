//! Pixpack Infrastructure Library
//!
//! Shared infrastructure for the Pixpack service:
//! - Middleware (request ID)
//! - Tracing subscriber initialization

pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use telemetry::{init_telemetry, LogFormat};
