//! Summary generation — one LLM call per job posting, with runtime and cost
//! measurement.

use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;

use crate::llm_client::{CompletionParams, LlmClient, LlmError, TokenUsage};
use crate::search::JobPosting;

use super::metrics::PerJobMetrics;
use super::prompts::{SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM};

/// Per-1K token rates for the summarization model.
const INPUT_COST_PER_1K: f64 = 0.0005;
const OUTPUT_COST_PER_1K: f64 = 0.0015;

/// Output cap — enough for a 280-character summary.
const SUMMARY_MAX_TOKENS: u32 = 100;
const SUMMARY_TEMPERATURE: f32 = 0.5;

/// A generated summary plus what it cost to produce.
#[derive(Debug, Clone)]
pub struct SummaryOutput {
    pub summary: String,
    pub metrics: PerJobMetrics,
}

/// The summary generation seam. The pipeline holds `Arc<dyn Summarizer>`;
/// tests substitute counting or failing fakes.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, job: &JobPosting) -> Result<SummaryOutput, LlmError>;
}

/// Production summarizer backed by the shared LLM client.
pub struct LlmSummarizer {
    llm: LlmClient,
}

impl LlmSummarizer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, job: &JobPosting) -> Result<SummaryOutput, LlmError> {
        let started = Instant::now();

        let prompt = SUMMARY_PROMPT_TEMPLATE.replace("{job_info}", &job_info(job));
        let completion = self
            .llm
            .complete(
                SUMMARY_SYSTEM,
                &prompt,
                CompletionParams {
                    max_tokens: SUMMARY_MAX_TOKENS,
                    temperature: SUMMARY_TEMPERATURE,
                },
            )
            .await?;

        let metrics = PerJobMetrics {
            runtime: started.elapsed().as_millis() as u64,
            tokens_used: completion.usage.total(),
            cost: estimate_cost(&completion.usage),
        };
        debug!(
            "summarized job {}: {} tokens, ${:.6}",
            job.id, metrics.tokens_used, metrics.cost
        );

        Ok(SummaryOutput {
            summary: completion.text,
            metrics,
        })
    }
}

/// Condenses a posting into the block the summary prompt embeds.
fn job_info(job: &JobPosting) -> String {
    let company = job
        .company
        .as_ref()
        .and_then(|c| c.display_name.as_deref())
        .unwrap_or("Unknown");
    format!(
        "Title: {}\nCompany: {}\nDescription: {}",
        job.title, company, job.description
    )
}

/// Split-rate cost estimate: input and output tokens are priced differently.
fn estimate_cost(usage: &TokenUsage) -> f64 {
    let input = usage.input_tokens as f64 / 1000.0 * INPUT_COST_PER_1K;
    let output = usage.output_tokens as f64 / 1000.0 * OUTPUT_COST_PER_1K;
    input + output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CompanyRef;

    fn posting(company: Option<&str>) -> JobPosting {
        JobPosting {
            id: "j1".to_string(),
            title: "Platform Engineer".to_string(),
            description: "Own the deploy pipeline.".to_string(),
            company: company.map(|name| CompanyRef {
                display_name: Some(name.to_string()),
            }),
            location: None,
            created: None,
            salary_min: None,
            salary_max: None,
            redirect_url: None,
        }
    }

    #[test]
    fn test_job_info_includes_title_company_description() {
        let info = job_info(&posting(Some("Acme")));
        assert_eq!(
            info,
            "Title: Platform Engineer\nCompany: Acme\nDescription: Own the deploy pipeline."
        );
    }

    #[test]
    fn test_job_info_falls_back_to_unknown_company() {
        let info = job_info(&posting(None));
        assert!(info.contains("Company: Unknown"));
    }

    #[test]
    fn test_estimate_cost_uses_split_rates() {
        let usage = TokenUsage {
            input_tokens: 2000,
            output_tokens: 1000,
        };
        // 2 * 0.0005 + 1 * 0.0015
        assert!((estimate_cost(&usage) - 0.0025).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_cost_zero_usage_is_free() {
        let usage = TokenUsage {
            input_tokens: 0,
            output_tokens: 0,
        };
        assert_eq!(estimate_cost(&usage), 0.0);
    }
}
