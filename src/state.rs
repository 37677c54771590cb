use std::sync::Arc;

use crate::config::AppConfig;
use crate::gateway::MemoryGateway;

/// Shared state of the development server.
#[derive(Clone)]
pub struct AppState {
    /// In-memory stand-in for the real backend storage.
    pub store: MemoryGateway,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { store: MemoryGateway::new(), config: Arc::new(config) }
    }

    pub fn with_store(store: MemoryGateway, config: AppConfig) -> Self {
        Self { store, config: Arc::new(config) }
    }
}
