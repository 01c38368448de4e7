mod config;
mod errors;
mod extraction;
mod llm_client;
mod resume;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::PdfPageExtractor;
use crate::llm_client::GeminiClient;
use crate::resume::pipeline::ResumePipeline;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::HttpDocumentFetcher;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Parse API v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; /parse-resume will fail until it is configured");
    }

    let fetcher = Arc::new(HttpDocumentFetcher::new(config.resume_url.clone()));
    info!("Document fetcher initialized ({})", config.resume_url);

    let model = Arc::new(GeminiClient::new(config.gemini_api_url.clone()));
    info!("LLM client initialized ({})", config.gemini_api_url);

    let pipeline = ResumePipeline::new(
        config.gemini_api_key.clone(),
        fetcher,
        Arc::new(PdfPageExtractor),
        model,
    );

    let app = build_router(AppState { pipeline })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
