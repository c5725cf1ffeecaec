use async_trait::async_trait;
use serde_json::Value;

use super::instruction::PromptInstruction;
use crate::error::GatewayError;

/// The hosted model behind the gateway.
///
/// Implementations issue exactly one request per call and hand back the raw
/// JSON body; text extraction happens in the service.
#[async_trait]
pub trait UpstreamProvider: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        instruction: &PromptInstruction,
    ) -> Result<Value, GatewayError>;
}
