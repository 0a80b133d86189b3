use crate::config::ServerConfig;
use hrp_model::{ArtifactStore, DatasetLocator, ModelRegistry};
use std::sync::Arc;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
}

impl AppState {
    pub fn new(registry: ModelRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(ModelRegistry::new(
            ArtifactStore::new(&config.model_dir),
            DatasetLocator::new(&config.data_dir, config.synthetic_fallback),
            config.training.clone(),
        ))
    }
}
