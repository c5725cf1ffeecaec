use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{instruction::PromptInstruction, upstream::UpstreamProvider};
use crate::{
    config::{ApiDialect, GatewayConfig},
    error::GatewayError,
};

const TEMPERATURE: f64 = 0.8;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 512;

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct TextPrompt {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateTextRequest {
    prompt: TextPrompt,
    temperature: f64,
    max_output_tokens: u32,
}

/// Google Generative Language API client.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    base_url: String,
    model: String,
    dialect: ApiDialect,
}

impl GeminiService {
    pub fn new(config: &GatewayConfig) -> Self {
        Self::with_client(
            Client::new(),
            config.base_url.clone(),
            config.model.clone(),
            config.dialect,
        )
    }

    pub fn with_client(client: Client, base_url: String, model: String, dialect: ApiDialect) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            dialect,
        }
    }

    pub fn endpoint(&self) -> String {
        match self.dialect {
            ApiDialect::GenerateContent => format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ),
            ApiDialect::GenerateText => format!(
                "{}/v1beta2/models/{}:generateText",
                self.base_url, self.model
            ),
        }
    }
}

#[async_trait]
impl UpstreamProvider for GeminiService {
    async fn generate(
        &self,
        api_key: &str,
        instruction: &PromptInstruction,
    ) -> Result<Value, GatewayError> {
        let request = match self.dialect {
            ApiDialect::GenerateContent => self
                .client
                .post(self.endpoint())
                .header("x-goog-api-key", api_key)
                .json(&GenerateContentRequest {
                    system_instruction: Content {
                        role: None,
                        parts: vec![Part {
                            text: &instruction.system,
                        }],
                    },
                    contents: vec![Content {
                        role: Some("user"),
                        parts: vec![Part {
                            text: &instruction.user,
                        }],
                    }],
                    generation_config: GenerationConfig {
                        temperature: TEMPERATURE,
                        top_p: TOP_P,
                    },
                }),
            ApiDialect::GenerateText => self
                .client
                .post(self.endpoint())
                .query(&[("key", api_key)])
                .json(&GenerateTextRequest {
                    prompt: TextPrompt {
                        text: instruction.flattened(),
                    },
                    temperature: TEMPERATURE,
                    max_output_tokens: MAX_OUTPUT_TOKENS,
                }),
        };

        tracing::debug!(model = %self.model, dialect = ?self.dialect, "calling upstream");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!(status = status.as_u16(), "failed to read upstream error body: {}", e);
                format!("<unreadable body: {}>", e)
            });
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.json::<Value>().await?;
        Ok(payload)
    }
}
