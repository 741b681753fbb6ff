//! Application state management

use std::sync::Arc;

use crate::config::{Config, LimitsConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config }),
        }
    }

    /// Get the request batch limits
    pub fn limits(&self) -> &LimitsConfig {
        &self.inner.config.limits
    }
}
