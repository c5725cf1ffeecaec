use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::{ErrorResponse, GenerationError, GenerationRequest, PromptService, DEFAULT_GATEWAY_URL};

/// Calls the gateway's `/api/generate` endpoint over HTTP.
pub struct GatewayService {
    client: Client,
    endpoint: String,
}

impl GatewayService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for GatewayService {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_URL)
    }
}

#[async_trait]
impl PromptService for GatewayService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::debug!(status = status.as_u16(), "gateway rejected generation: {}", message);
            return Err(GenerationError::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        Ok(body
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

/// Prefers the gateway's `{"error": ...}` body and falls back to the status text.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error)
        .filter(|message| !message.is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}
