mod config;
mod errors;
mod geo;
mod llm_client;
mod render;
mod routes;
mod session;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Cli, Config};
use crate::geo::NominatimGeocoder;
use crate::llm_client::OpenAiClient;
use crate::routes::build_router;
use crate::session::MemorySessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on an unreadable env file or malformed numbers)
    let config = Config::from_env(&cli)?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting History Map v{}", env!("CARGO_PKG_VERSION"));

    if config.openai_api_key.is_some() {
        info!("Default OpenAI key loaded; new sessions start with it");
    } else {
        error!("Failed to load an OpenAI key; users must enter one at /api_key");
    }

    let geocoder = NominatimGeocoder::new(
        config.geocoder_url.clone(),
        &config.geocoder_user_agent,
        config.geocoder_language.clone(),
        config.geocoder_timeout,
    )?;
    info!("Geocoder initialized ({})", config.geocoder_url);

    let llm = OpenAiClient::new(
        config.openai_base_url.clone(),
        config.llm_timeout,
        config.llm_max_tokens,
    )?;
    info!("LLM client initialized ({})", config.openai_base_url);

    let state = AppState {
        geocoder: Arc::new(geocoder),
        llm: Arc::new(llm),
        sessions: Arc::new(MemorySessionStore::new()),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
