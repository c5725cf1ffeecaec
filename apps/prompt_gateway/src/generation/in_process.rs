use async_trait::async_trait;
use prompt_client::{GenerationError, GenerationRequest, PromptService};

use super::generation_service::GenerationService;
use crate::error::GatewayError;

/// Runs the gateway pipeline inside the calling process, for callers that
/// already hold the upstream credential and need no HTTP hop.
#[derive(Clone)]
pub struct InProcessService {
    service: GenerationService,
}

impl InProcessService {
    pub fn new(service: GenerationService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PromptService for InProcessService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.service
            .generate(request)
            .await
            .map_err(|e| match e {
                GatewayError::Transport(message) => GenerationError::Transport(message),
                other => GenerationError::Gateway {
                    status: other.status().as_u16(),
                    message: other.to_string(),
                },
            })
    }
}
