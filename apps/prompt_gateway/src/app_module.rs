use std::sync::Arc;

use crate::{
    config::GatewayConfig,
    generation::{generation_service::GenerationService, upstream::UpstreamProvider},
};

#[derive(Clone)]
pub struct AppState {
    pub service: GenerationService,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            service: GenerationService::from_config(&config),
            config: Arc::new(config),
        }
    }

    pub fn with_upstream(config: GatewayConfig, upstream: Arc<dyn UpstreamProvider>) -> Self {
        Self {
            service: GenerationService::new(upstream, &config),
            config: Arc::new(config),
        }
    }
}
