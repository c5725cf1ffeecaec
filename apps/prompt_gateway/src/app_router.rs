use axum::{
    extract::Request,
    http::{header, HeaderValue},
    routing::get,
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::info_span;
use uuid::Uuid;

use crate::{
    app_module::AppState, generation::generation_controller::generation_router,
    health::health_controller,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn application_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id
        )
    });

    Router::new()
        .route("/healthz", get(health_controller::health))
        .merge(generation_router())
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("GET,POST,OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type"),
                ))
                .layer(Extension(state))
                .into_inner(),
        )
}
