//! Shared application state.

use std::sync::Arc;

use pagewise_chat::{Dispatcher, ProviderConfig};
use pagewise_core::{Result, ServerConfig};

/// Shared application state accessible from all route handlers.
///
/// Read-only after startup; chat requests never write to it.
pub struct AppState {
    pub config: ServerConfig,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: ServerConfig, providers: ProviderConfig) -> Result<Self> {
        let dispatcher = Dispatcher::new(Arc::new(providers), config.upstream_timeout())?;
        Ok(Self { config, dispatcher })
    }
}
