//! Shared state handed to every request handler.

use std::sync::Arc;

use crate::config::{ConfigLoader, HoursConfig};

/// Shared application state.
///
/// Holds the loaded hours configuration behind an `Arc` so cloning per
/// request is cheap.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates application state from a loaded configuration.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The hours configuration used for every report.
    pub fn config(&self) -> &HoursConfig {
        self.config.config()
    }
}
