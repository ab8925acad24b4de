//! Tracing initialization
//!
//! Structured logging through `tracing-subscriber`; OpenTelemetry export is not
//! part of this service.

mod init_basic;

pub use init_basic::{init_telemetry, LogFormat};
