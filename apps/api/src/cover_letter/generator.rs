//! Cover letter generation — one LLM call per request, cost tracked in its
//! own metrics namespace.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::enrichment::metrics::{GlobalMetrics, MetricsAggregator, PerJobMetrics};
use crate::llm_client::{CompletionParams, LlmClient, LlmError};

use super::prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};

/// Flat per-1K total-token rate used for cover letter cost estimates.
const COST_PER_1K_TOKENS: f64 = 0.0015;

/// Output cap — enough for a ~120-word paragraph.
const COVER_LETTER_MAX_TOKENS: u32 = 250;
/// Slightly creative but still professional.
const COVER_LETTER_TEMPERATURE: f32 = 0.7;

/// Validated input for cover letter generation: title and summary are
/// required, company is optional.
#[derive(Debug, Clone)]
pub struct CoverLetterJob {
    pub title: String,
    pub summary: String,
    pub company: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CoverLetterOutput {
    pub cover_letter: String,
    pub metrics: PerJobMetrics,
}

#[derive(Clone)]
pub struct CoverLetterGenerator {
    llm: LlmClient,
    metrics: Arc<MetricsAggregator>,
}

impl CoverLetterGenerator {
    pub fn new(llm: LlmClient, metrics: Arc<MetricsAggregator>) -> Self {
        Self { llm, metrics }
    }

    /// Generates a cover letter paragraph for a validated job. A provider
    /// failure propagates — the totals are only updated on success.
    pub async fn generate(&self, job: &CoverLetterJob) -> Result<CoverLetterOutput, LlmError> {
        let started = Instant::now();

        let prompt = COVER_LETTER_PROMPT_TEMPLATE.replace("{job_info}", &job_info(job));
        let completion = self
            .llm
            .complete(
                COVER_LETTER_SYSTEM,
                &prompt,
                CompletionParams {
                    max_tokens: COVER_LETTER_MAX_TOKENS,
                    temperature: COVER_LETTER_TEMPERATURE,
                },
            )
            .await?;

        let tokens = completion.usage.total();
        let metrics = PerJobMetrics {
            runtime: started.elapsed().as_millis() as u64,
            tokens_used: tokens,
            cost: tokens as f64 / 1000.0 * COST_PER_1K_TOKENS,
        };
        debug!(
            "generated cover letter for {:?}: {} tokens, ${:.6}",
            job.title, metrics.tokens_used, metrics.cost
        );

        self.metrics
            .record_success(metrics.runtime, metrics.tokens_used, metrics.cost);

        Ok(CoverLetterOutput {
            cover_letter: completion.text,
            metrics,
        })
    }

    pub fn metrics_snapshot(&self) -> GlobalMetrics {
        self.metrics.snapshot()
    }
}

/// Condenses the job into the block the cover letter prompt embeds.
fn job_info(job: &CoverLetterJob) -> String {
    let company = job.company.as_deref().unwrap_or("Unknown");
    format!(
        "Job Title: {}\nCompany: {}\nJob Summary: {}",
        job.title, company, job.summary
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn job() -> CoverLetterJob {
        CoverLetterJob {
            title: "Platform Engineer".to_string(),
            summary: "Own the deploy pipeline for a fintech platform.".to_string(),
            company: Some("Acme".to_string()),
        }
    }

    #[test]
    fn test_job_info_includes_title_company_summary() {
        let info = job_info(&job());
        assert_eq!(
            info,
            "Job Title: Platform Engineer\nCompany: Acme\nJob Summary: Own the deploy pipeline for a fintech platform."
        );
    }

    #[test]
    fn test_job_info_falls_back_to_unknown_company() {
        let mut job = job();
        job.company = None;
        assert!(job_info(&job).contains("Company: Unknown"));
    }

    #[tokio::test]
    async fn test_generate_computes_flat_rate_cost_and_records_metrics() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "text", "text": "I am excited to apply."}],
                "usage": {"input_tokens": 600, "output_tokens": 400}
            })))
            .mount(&server)
            .await;

        let metrics = Arc::new(MetricsAggregator::new());
        let generator = CoverLetterGenerator::new(
            LlmClient::with_base_url("test-key".to_string(), server.uri()),
            metrics.clone(),
        );

        let output = generator.generate(&job()).await.unwrap();

        assert_eq!(output.cover_letter, "I am excited to apply.");
        assert_eq!(output.metrics.tokens_used, 1000);
        // Flat rate on total tokens: 1000 / 1000 * 0.0015
        assert!((output.metrics.cost - 0.0015).abs() < 1e-12);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.request_count, 1);
        assert_eq!(snapshot.total_tokens, 1000);
    }

    #[tokio::test]
    async fn test_generate_propagates_provider_failure_without_metrics() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"message": "bad request"}
            })))
            .mount(&server)
            .await;

        let metrics = Arc::new(MetricsAggregator::new());
        let generator = CoverLetterGenerator::new(
            LlmClient::with_base_url("test-key".to_string(), server.uri()),
            metrics.clone(),
        );

        let err = generator.generate(&job()).await.unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 400, .. }));
        // No fallback text and no metrics effect on failure.
        assert_eq!(metrics.snapshot().request_count, 0);
    }
}
