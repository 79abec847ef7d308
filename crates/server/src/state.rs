//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::CommerceServices;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers the
/// configuration and the service facade.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    services: Arc<dyn CommerceServices>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `services` - Facade the handlers call into
    #[must_use]
    pub fn new(config: ServerConfig, services: Arc<dyn CommerceServices>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, services }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the service facade.
    #[must_use]
    pub fn services(&self) -> &dyn CommerceServices {
        self.inner.services.as_ref()
    }
}
