use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;

mod error;
pub mod gateway_api;
mod style;

pub use error::GenerationError;
pub use gateway_api::GatewayService;
pub use style::PromptStyle;

pub const MAX_TOPIC_CHARS: usize = 500;
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3002/api/generate";
pub const FALLBACK_TEXT: &str = "Failed to generate prompt. Please try again.";

/// Body of `POST /api/generate`.
///
/// `style` stays a free-form label on the wire; [`PromptClient`] only ever
/// sends one of the [`PromptStyle`] labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub style: String,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, style: PromptStyle) -> Self {
        Self {
            topic: topic.into(),
            style: style.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A backend able to turn one [`GenerationRequest`] into prompt text.
///
/// An empty string means the backend answered without any text; the client
/// replaces it with [`FALLBACK_TEXT`].
#[async_trait]
pub trait PromptService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub max_topic_chars: usize,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_topic_chars: MAX_TOPIC_CHARS,
            timeout: None,
        }
    }
}

pub struct PromptClient {
    service: Box<dyn PromptService>,
    config: ClientConfig,
}

impl PromptClient {
    pub fn new(service: impl PromptService + 'static) -> Self {
        Self {
            service: Box::new(service),
            config: ClientConfig::default(),
        }
    }

    /// Client that proxies through the gateway at `endpoint`, keeping the
    /// upstream credential on the server.
    pub fn gateway(endpoint: impl Into<String>) -> Self {
        Self::new(GatewayService::new(endpoint))
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn with_max_topic_chars(mut self, max_topic_chars: usize) -> Self {
        self.config.max_topic_chars = max_topic_chars;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Checks the topic before anything touches the network.
    pub fn prepare(&self, topic: &str, style: PromptStyle) -> Result<GenerationRequest, GenerationError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GenerationError::EmptyTopic);
        }
        if topic.chars().count() > self.config.max_topic_chars {
            return Err(GenerationError::TopicTooLong {
                max: self.config.max_topic_chars,
            });
        }
        Ok(GenerationRequest::new(topic, style))
    }

    pub async fn generate(&self, topic: &str, style: PromptStyle) -> Result<String, GenerationError> {
        let request = self.prepare(topic, style)?;

        let dispatch = self.service.generate(&request);
        let result = match self.config.timeout {
            Some(limit) => match timeout(limit, dispatch).await {
                Ok(result) => result,
                Err(_) => Err(GenerationError::Transport(format!(
                    "Request timed out after {:?}",
                    limit
                ))),
            },
            None => dispatch.await,
        };

        match result {
            Ok(text) if text.is_empty() => {
                tracing::warn!(style = %style, "generation returned no text");
                Ok(FALLBACK_TEXT.to_string())
            }
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::error!("Prompt generation error: {}", e);
                Err(e)
            }
        }
    }
}
