//! Shared application state

use pixpack_core::Config;

/// State shared by all handlers. Immutable after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}
