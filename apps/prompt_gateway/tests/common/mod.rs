#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use prompt_gateway::{CredentialSource, GatewayConfig, GatewayError, PromptInstruction, UpstreamProvider};
use serde_json::Value;

/// Upstream double that records every call and replays a fixed outcome.
pub struct MockUpstream {
    reply: Result<Value, (u16, String)>,
    calls: Mutex<Vec<(String, PromptInstruction)>>,
}

impl MockUpstream {
    pub fn replying(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(payload),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((status, body.to_string())),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, PromptInstruction)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamProvider for MockUpstream {
    async fn generate(
        &self,
        api_key: &str,
        instruction: &PromptInstruction,
    ) -> Result<Value, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), instruction.clone()));
        match &self.reply {
            Ok(payload) => Ok(payload.clone()),
            Err((status, body)) => Err(GatewayError::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}

pub fn config_with_key(key: Option<&str>) -> GatewayConfig {
    GatewayConfig::default().with_credentials(CredentialSource::Static(key.map(str::to_string)))
}

pub async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
