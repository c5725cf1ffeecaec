use axum::{
    body::Bytes,
    http::Method,
    response::{IntoResponse, Response},
    routing::any,
    Extension, Json, Router,
};

use super::generation_service::{GatewayRequest, GatewayResponse};
use crate::app_module::AppState;

pub fn generation_router() -> Router {
    Router::new().route("/api/generate", any(generate_prompt))
}

pub async fn generate_prompt(
    Extension(ctx): Extension<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    ctx.service
        .handle(GatewayRequest::new(method, body))
        .await
        .into_response()
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}
