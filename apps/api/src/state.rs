use std::sync::Arc;

use crate::cover_letter::generator::CoverLetterGenerator;
use crate::enrichment::metrics::MetricsAggregator;
use crate::enrichment::pipeline::EnrichmentPipeline;
use crate::enrichment::summarizer::Summarizer;

/// Shared application state injected into all route handlers via Axum
/// extractors. Cache and metrics live inside the components that own them —
/// nothing here is ambient process state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: EnrichmentPipeline,
    /// Shared with the pipeline; also serves single-job summarize requests.
    pub summarizer: Arc<dyn Summarizer>,
    /// Totals for the single-job summarize endpoint. Separate namespace
    /// from the pipeline's aggregator.
    pub summarize_metrics: Arc<MetricsAggregator>,
    pub cover_letters: CoverLetterGenerator,
}
