//! Application state for the HTTP server.

use std::sync::Arc;

use crate::nasa::NasaProvider;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream provider used to serve proxy requests
    pub provider: Arc<dyn NasaProvider>,
}

impl AppState {
    /// Create a new application state with the given provider.
    pub fn new(provider: Arc<dyn NasaProvider>) -> Self {
        Self { provider }
    }
}
