//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ConfigService;
use crate::domain::repositories::ConfigRepository;

/// State shared by all request handlers.
///
/// The service is built over a trait object so the router can run on the
/// fallback adapter in production and on a memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub config_service: Arc<ConfigService<dyn ConfigRepository>>,
}

impl AppState {
    /// Builds the state around a storage backend.
    pub fn new(repository: Arc<dyn ConfigRepository>, public_base_url: impl Into<String>) -> Self {
        Self {
            config_service: Arc::new(ConfigService::new(repository, public_base_url)),
        }
    }
}
