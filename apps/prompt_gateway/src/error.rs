use axum::http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::generation::generation_service::GatewayResponse;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Validation(String),

    #[error("Server not configured: {0}")]
    Configuration(String),

    #[error("Upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("{0}")]
    Transport(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Configuration(_) | GatewayError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    pub fn into_response(self) -> GatewayResponse {
        GatewayResponse::json(self.status(), json!({ "error": self.to_string() }))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        GatewayError::Transport(error.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {key}={value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}
