use std::env;

use anyhow::Context;
use dotenvy::dotenv;
use prompt_gateway::{app_module::AppState, app_router::application_router, config::GatewayConfig};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let config = GatewayConfig::from_env().context("failed to load gateway configuration")?;
    if config.credentials.resolve().is_none() {
        tracing::warn!("GENAI_API_KEY is not set; generation requests will answer 500 until it is");
    }
    tracing::info!(
        model = %config.model,
        dialect = ?config.dialect,
        "upstream configured"
    );

    let addr = config.socket_addr();
    let app = application_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("unable to bind {}", addr))?;

    tracing::info!("Local API server running on http://{}", addr);
    axum::serve(listener, app)
        .await
        .context("server stopped unexpectedly")?;

    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let subscriber_builder = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE);

    if env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "dev" {
        tracing::subscriber::set_global_default(subscriber_builder.pretty().with_ansi(true).finish())
            .context("setting dev subscriber failed")
    } else {
        tracing::subscriber::set_global_default(subscriber_builder.json().with_ansi(false).finish())
            .context("setting prod subscriber failed")
    }
}
