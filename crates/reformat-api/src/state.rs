//! Application state shared across all handlers.

use std::sync::Arc;

use reformat_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Read-only after
/// startup, so it is safe to share across concurrent requests without
/// synchronization.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state from a loaded configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
