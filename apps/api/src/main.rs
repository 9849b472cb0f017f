mod config;
mod dispatch;
mod errors;
mod llm_client;
mod pages;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dispatch::PromptDispatcher;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (.env, then the secrets file)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Module targets use underscores, the package name a hyphen.
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sensei API v{}", env!("CARGO_PKG_VERSION"));

    if config.credential.is_none() {
        warn!(
            "No OpenAI API key found; consultations will return setup guidance \
             instead of model replies"
        );
    }

    // Initialize LLM client
    let llm = LlmClient::new();
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build the dispatcher and app state
    let dispatcher = Arc::new(PromptDispatcher::new(
        config.credential.clone(),
        Arc::new(llm),
    ));
    let state = AppState { dispatcher };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
