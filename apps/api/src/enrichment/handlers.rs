//! Axum route handlers for job search enrichment and single-job
//! summarization.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::search::{CompanyRef, JobPosting, LocationRef};
use crate::state::AppState;

use super::metrics::{GlobalMetrics, PerJobMetrics};
use super::pipeline::EnrichmentOutcome;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchJobsRequest {
    /// Forwarded to the provider as-is; a missing keyword becomes "".
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: GlobalMetrics,
}

#[derive(Debug, Serialize)]
pub struct ResetMetricsResponse {
    pub success: bool,
    pub message: String,
    pub metrics: GlobalMetrics,
}

/// A job posting as supplied by the client for single-job summarization.
/// Everything is optional at the edge; validation decides what is required.
#[derive(Debug, Default, Deserialize)]
pub struct JobInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company: Option<CompanyRef>,
    #[serde(default)]
    pub location: Option<LocationRef>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub job: Option<JobInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResponse {
    pub summary: String,
    pub metrics: PerJobMetrics,
    pub global_metrics: GlobalMetrics,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/search
///
/// Runs the full enrichment pipeline for a keyword. Always returns the full
/// job list (possibly with sentinel summaries) unless the search itself
/// failed.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(request): Json<SearchJobsRequest>,
) -> Result<Json<EnrichmentOutcome>, AppError> {
    let keyword = request.keyword.unwrap_or_default();
    let outcome = state
        .pipeline
        .enrich(&keyword)
        .await
        .map_err(|e| AppError::Search(format!("job search failed: {e}")))?;
    Ok(Json(outcome))
}

/// GET /api/v1/jobs/metrics
pub async fn handle_get_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        metrics: state.pipeline.metrics_snapshot(),
    })
}

/// POST /api/v1/jobs/metrics/reset
///
/// Zeroes the enrichment totals and clears the summary cache.
pub async fn handle_reset_metrics(State(state): State<AppState>) -> Json<ResetMetricsResponse> {
    let metrics = state.pipeline.reset_metrics();
    Json(ResetMetricsResponse {
        success: true,
        message: "Metrics reset successfully".to_string(),
        metrics,
    })
}

/// POST /api/v1/summarize
///
/// Summarizes a single client-supplied job. Unlike the batched pipeline,
/// a generation failure here is fatal for the call — there is no sentinel.
pub async fn handle_summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let job = posting_from_input(request.job)?;

    let output = state
        .summarizer
        .summarize(&job)
        .await
        .map_err(|e| AppError::Generation(format!("Failed to summarize job: {e}")))?;

    state.summarize_metrics.record_success(
        output.metrics.runtime,
        output.metrics.tokens_used,
        output.metrics.cost,
    );

    Ok(Json(SummarizeResponse {
        summary: output.summary,
        metrics: output.metrics,
        global_metrics: state.summarize_metrics.snapshot(),
    }))
}

/// GET /api/v1/summarize/metrics
pub async fn handle_summarize_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        metrics: state.summarize_metrics.snapshot(),
    })
}

/// Validates a client-supplied job before any provider call. A description
/// is required; the rest defaults.
fn posting_from_input(input: Option<JobInput>) -> Result<JobPosting, AppError> {
    let missing = || AppError::Validation("Missing job data or job description".to_string());
    let input = input.ok_or_else(missing)?;
    let description = input
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(missing)?;

    Ok(JobPosting {
        id: input.id.unwrap_or_default(),
        title: input.title.unwrap_or_default(),
        description,
        company: input.company,
        location: input.location,
        created: input.created,
        salary_min: input.salary_min,
        salary_max: input.salary_max,
        redirect_url: input.redirect_url,
    })
}
