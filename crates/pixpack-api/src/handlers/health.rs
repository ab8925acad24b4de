//! Liveness endpoint

use axum::{http::StatusCode, response::IntoResponse};

use crate::constants::HEALTH_MESSAGE;

/// Process is up and serving requests. No dependency checks, no side effects.
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, HEALTH_MESSAGE)
}
