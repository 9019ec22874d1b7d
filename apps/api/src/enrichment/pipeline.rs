//! Enrichment pipeline — orchestrates the core flow.
//!
//! Flow: search → partition into batches → summarize each batch concurrently
//! (cache-aware) → assemble → metrics update.
//!
//! Batches run strictly in order; within a batch every job is summarized
//! concurrently, so at most `batch_size` generation calls are in flight at
//! once. Output order always matches provider order — batch results are
//! collected positionally, not in completion order.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::future;
use serde::Serialize;
use tracing::{info, warn};

use crate::search::{CompanyRef, JobPosting, JobSearch, LocationRef, SearchError};

use super::cache::{summary_key, SummaryCache};
use super::metrics::{GlobalMetrics, MetricsAggregator, PerJobMetrics};
use super::summarizer::Summarizer;

pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Sentinel substituted when summary generation fails. Sentinel results are
/// never cached, so the next identical request retries generation.
pub const FAILED_SUMMARY: &str = "Failed to generate summary.";

/// A posting with its generated summary and per-job usage metrics.
/// Immutable after creation; cache hits return it verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedJob {
    pub id: String,
    pub title: String,
    pub description: String,
    pub company: Option<CompanyRef>,
    pub location: Option<LocationRef>,
    pub created: Option<DateTime<Utc>>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub url: Option<String>,
    pub summary: String,
    pub metrics: PerJobMetrics,
}

impl EnrichedJob {
    fn assemble(posting: &JobPosting, summary: String, metrics: PerJobMetrics) -> Self {
        Self {
            id: posting.id.clone(),
            title: posting.title.clone(),
            description: posting.description.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            created: posting.created,
            salary_min: posting.salary_min,
            salary_max: posting.salary_max,
            url: posting.redirect_url.clone(),
            summary,
            metrics,
        }
    }
}

/// Metrics for one `enrich` run: its wall-clock duration plus a snapshot of
/// the running totals at completion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMetrics {
    pub operation_runtime: u64,
    pub global_metrics: GlobalMetrics,
}

#[derive(Debug, Serialize)]
pub struct EnrichmentOutcome {
    pub jobs: Vec<EnrichedJob>,
    pub metrics: OperationMetrics,
}

/// The enrichment pipeline. Shared cache and metrics are injected so
/// concurrent invocations (and tests) operate on explicitly owned state.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    search: Arc<dyn JobSearch>,
    summarizer: Arc<dyn Summarizer>,
    cache: Arc<SummaryCache>,
    metrics: Arc<MetricsAggregator>,
    batch_size: usize,
}

impl EnrichmentPipeline {
    pub fn new(
        search: Arc<dyn JobSearch>,
        summarizer: Arc<dyn Summarizer>,
        cache: Arc<SummaryCache>,
        metrics: Arc<MetricsAggregator>,
        batch_size: usize,
    ) -> Self {
        Self {
            search,
            summarizer,
            cache,
            metrics,
            batch_size: batch_size.max(1),
        }
    }

    /// Runs the full enrichment flow for a keyword.
    ///
    /// The search call happens exactly once; its failure aborts the whole
    /// operation with nothing cached or counted. Everything after it is
    /// per-job contained: a failed summary becomes a sentinel entry, never
    /// an error.
    pub async fn enrich(&self, keyword: &str) -> Result<EnrichmentOutcome, SearchError> {
        let started = Instant::now();

        let postings = self.search.search(keyword).await?;
        info!(
            "enriching {} postings for keyword {keyword:?}",
            postings.len()
        );

        let mut jobs = Vec::with_capacity(postings.len());
        for batch in postings.chunks(self.batch_size) {
            // join_all returns results in input order regardless of
            // completion order.
            let results = future::join_all(batch.iter().map(|p| self.enrich_one(p))).await;
            jobs.extend(results);
        }

        self.metrics.mark_refreshed(Utc::now());
        let metrics = OperationMetrics {
            operation_runtime: started.elapsed().as_millis() as u64,
            global_metrics: self.metrics.snapshot(),
        };

        Ok(EnrichmentOutcome { jobs, metrics })
    }

    async fn enrich_one(&self, posting: &JobPosting) -> EnrichedJob {
        let key = summary_key(&posting.id);

        if let Some(cached) = self.cache.get(&key) {
            self.metrics.record_cache_hit();
            return cached;
        }

        match self.summarizer.summarize(posting).await {
            Ok(output) => {
                self.metrics.record_success(
                    output.metrics.runtime,
                    output.metrics.tokens_used,
                    output.metrics.cost,
                );
                let enriched = EnrichedJob::assemble(posting, output.summary, output.metrics);
                self.cache.insert(key, enriched.clone());
                enriched
            }
            Err(err) => {
                warn!("summary generation failed for job {}: {err}", posting.id);
                self.metrics.record_failure();
                EnrichedJob::assemble(posting, FAILED_SUMMARY.to_string(), PerJobMetrics::default())
            }
        }
    }

    pub fn metrics_snapshot(&self) -> GlobalMetrics {
        self.metrics.snapshot()
    }

    /// Zeroes the running totals and empties the summary cache in one
    /// operation. Returns the post-reset totals.
    pub fn reset_metrics(&self) -> GlobalMetrics {
        self.cache.clear();
        self.metrics.reset()
    }
}
