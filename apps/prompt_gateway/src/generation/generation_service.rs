use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use prompt_client::{GenerationRequest, PromptStyle};
use serde_json::{json, Map, Value};

use super::{
    extraction::extract_text, gemini_service::GeminiService, instruction::PromptInstruction,
    upstream::UpstreamProvider,
};
use crate::{
    config::{CredentialSource, GatewayConfig},
    error::GatewayError,
};

/// Host-independent view of an inbound call.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub method: Method,
    pub body: Bytes,
}

impl GatewayRequest {
    pub fn new(method: Method, body: impl Into<Bytes>) -> Self {
        Self {
            method,
            body: body.into(),
        }
    }
}

/// Host-independent response; `body: None` is an empty body.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl GatewayResponse {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: None,
        }
    }

    pub fn text(text: String) -> Self {
        Self::json(StatusCode::OK, json!({ "text": text }))
    }
}

/// validate → build instruction → call upstream → extract text → respond.
#[derive(Clone)]
pub struct GenerationService {
    upstream: Arc<dyn UpstreamProvider>,
    credentials: CredentialSource,
    max_topic_chars: usize,
}

impl GenerationService {
    pub fn new(upstream: Arc<dyn UpstreamProvider>, config: &GatewayConfig) -> Self {
        Self {
            upstream,
            credentials: config.credentials.clone(),
            max_topic_chars: config.max_topic_chars,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(Arc::new(GeminiService::new(config)), config)
    }

    pub async fn handle(&self, request: GatewayRequest) -> GatewayResponse {
        if request.method == Method::OPTIONS {
            return GatewayResponse::no_content();
        }

        match self.process(request).await {
            Ok(text) => GatewayResponse::text(text),
            Err(e) => {
                match &e {
                    GatewayError::MethodNotAllowed | GatewayError::Validation(_) => {
                        tracing::warn!("Rejected generation request: {}", e)
                    }
                    _ => tracing::error!("Server-side generation error: {}", e),
                }
                e.into_response()
            }
        }
    }

    async fn process(&self, request: GatewayRequest) -> Result<String, GatewayError> {
        if request.method != Method::POST {
            return Err(GatewayError::MethodNotAllowed);
        }

        let generation = self.validate(&request.body)?;
        self.generate(&generation).await
    }

    /// Parses and checks a raw body. An empty body counts as `{}`.
    pub fn validate(&self, body: &[u8]) -> Result<GenerationRequest, GatewayError> {
        let payload: Value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(body)
                .map_err(|_| GatewayError::Validation("Invalid JSON".to_string()))?
        };

        let topic = payload
            .get("topic")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
            .ok_or_else(|| GatewayError::Validation("Missing topic".to_string()))?;

        if topic.chars().count() > self.max_topic_chars {
            return Err(GatewayError::Validation("Topic too long".to_string()));
        }

        let style = payload
            .get("style")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|style| !style.is_empty())
            .unwrap_or(PromptStyle::default().label());

        Ok(GenerationRequest {
            topic: topic.to_string(),
            style: style.to_string(),
        })
    }

    /// One upstream call for an already validated request.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, GatewayError> {
        let api_key = self
            .credentials
            .resolve()
            .ok_or_else(|| GatewayError::Configuration("GENAI_API_KEY missing".to_string()))?;

        let instruction = PromptInstruction::build(&request.topic, &request.style);
        let payload = self.upstream.generate(&api_key, &instruction).await?;

        Ok(extract_text(&payload))
    }
}
