mod bulk;
mod config;
mod errors;
mod lifecycle;
mod listing;
mod models;
mod offers;
mod recruitment_client;
mod routes;
mod scheduling;
mod screening;
mod state;
mod status;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::recruitment_client::RecruitmentClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    let client = RecruitmentClient::new(
        config.recruitment_api_url.clone(),
        Duration::from_millis(config.request_timeout_ms),
    )
    .context("failed to build recruitment-service client")?;
    info!(
        "recruitment-service at {} (timeout {}ms, bulk concurrency {})",
        client.base_url(),
        config.request_timeout_ms,
        config.bulk_concurrency
    );

    let cors = build_cors(&config)?;

    let state = AppState {
        client,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Credentials travel as a cookie, so a configured origin also allows them.
fn build_cors(config: &Config) -> Result<CorsLayer> {
    match &config.cors_allowed_origin {
        None => Ok(CorsLayer::permissive()),
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("CORS_ALLOWED_ORIGIN '{origin}' is not a valid header value"))?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true))
        }
    }
}
