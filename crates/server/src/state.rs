use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use matcher::Matcher;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use store::ItemStore;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Record store (shared across requests)
    pub store: Arc<dyn ItemStore>,

    /// Matcher instance (shared across requests)
    pub matcher: Arc<Matcher>,

    /// Prometheus render handle, present once the recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state, building the configured store backend
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let store: Arc<dyn ItemStore> = Arc::from(config.store.build()?);
        Self::with_store(config, store)
    }

    /// Create state around an existing store, e.g. one pre-seeded in tests
    pub fn with_store(config: ServerConfig, store: Arc<dyn ItemStore>) -> ServerResult<Self> {
        let matcher = Matcher::new(config.matcher.clone())
            .map_err(|err| ServerError::Config(err.to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            store,
            matcher: Arc::new(matcher),
            metrics_handle: None,
        })
    }

    pub fn with_metrics_handle(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
