mod config;
mod cover_letter;
mod enrichment;
mod errors;
mod llm_client;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::cover_letter::generator::CoverLetterGenerator;
use crate::enrichment::cache::SummaryCache;
use crate::enrichment::metrics::MetricsAggregator;
use crate::enrichment::pipeline::EnrichmentPipeline;
use crate::enrichment::summarizer::{LlmSummarizer, Summarizer};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::search::adzuna::AdzunaClient;
use crate::search::JobSearch;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scout API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize search provider
    let search: Arc<dyn JobSearch> = Arc::new(AdzunaClient::new(&config));
    info!(
        "Search client initialized (country: {}, {} results/page)",
        config.adzuna_country, config.results_per_page
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build the enrichment pipeline around its injected cache and metrics
    let summarizer: Arc<dyn Summarizer> = Arc::new(LlmSummarizer::new(llm.clone()));
    let cache = Arc::new(SummaryCache::new(config.cache_capacity));
    let pipeline = EnrichmentPipeline::new(
        search,
        summarizer.clone(),
        cache,
        Arc::new(MetricsAggregator::new()),
        config.batch_size,
    );
    info!(
        "Enrichment pipeline initialized (batch size: {}, cache capacity: {})",
        config.batch_size, config.cache_capacity
    );

    let cover_letters = CoverLetterGenerator::new(llm, Arc::new(MetricsAggregator::new()));

    // Build app state
    let state = AppState {
        pipeline,
        summarizer,
        summarize_metrics: Arc::new(MetricsAggregator::new()),
        cover_letters,
    };

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
