use std::sync::Arc;

use medplat_core::catalog::RuleCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the config is behind `Arc` and the catalog is a
/// process-wide static.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Rule specifications served by the validation routes.
    pub catalog: &'static RuleCatalog,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            catalog: medplat_core::catalog::catalog(),
        }
    }
}
