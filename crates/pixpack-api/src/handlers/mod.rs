//! HTTP handlers

pub mod convert;
pub mod health;
