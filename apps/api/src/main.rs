mod config;
mod errors;
mod export;
mod gateway;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod store;
mod translation;
mod workspace;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::export::HtmlExporter;
use crate::gateway::GeminiGateway;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileStore, MemoryStore, SessionStore, WorkingCopy};
use crate::workspace::Workspace;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SmartCV API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generative backend
    let llm = LlmClient::new(config.gemini_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let gateway = Arc::new(GeminiGateway::new(llm));

    // Named saves live next to the working copy; without a usable directory
    // they last for this process only.
    let store: Arc<dyn SessionStore> = match FileStore::open(config.saves_dir()).await {
        Ok(store) => {
            info!("Session store at {}", config.saves_dir().display());
            Arc::new(store)
        }
        Err(e) => {
            warn!("Saves will not persist across restarts: {}", e);
            Arc::new(MemoryStore::new())
        }
    };

    let workspace = Workspace::restore(
        gateway,
        store,
        WorkingCopy::new(config.working_copy_path()),
        config.workspace_settings(),
    )
    .await;
    info!(
        "Workspace ready (translation concurrency {}, undo depth {})",
        config.translation_concurrency, config.undo_depth
    );

    let state = AppState {
        workspace: Arc::new(workspace),
        exporter: Arc::new(HtmlExporter),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // local browser front-end

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
