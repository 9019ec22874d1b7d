//! Axum route handlers for cover letter generation.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::enrichment::handlers::MetricsResponse;
use crate::enrichment::metrics::{GlobalMetrics, PerJobMetrics};
use crate::errors::AppError;
use crate::search::CompanyRef;
use crate::state::AppState;

use super::generator::CoverLetterJob;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Job fields as supplied by the client. Everything is optional at the edge;
/// validation decides what is required.
#[derive(Debug, Default, Deserialize)]
pub struct CoverLetterJobInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub company: Option<CompanyRef>,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub job: Option<CoverLetterJobInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
    pub metrics: PerJobMetrics,
    pub global_metrics: GlobalMetrics,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letter
///
/// Generates a personalized cover letter paragraph. Requires a title and a
/// summary; rejected before any provider call otherwise. Provider failures
/// surface as errors — cover letters have no sentinel fallback.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let job = job_from_input(request.job)?;

    let output = state
        .cover_letters
        .generate(&job)
        .await
        .map_err(|e| AppError::Generation(format!("Failed to generate cover letter: {e}")))?;

    Ok(Json(CoverLetterResponse {
        cover_letter: output.cover_letter,
        metrics: output.metrics,
        global_metrics: state.cover_letters.metrics_snapshot(),
    }))
}

/// GET /api/v1/cover-letter/metrics
pub async fn handle_cover_letter_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        metrics: state.cover_letters.metrics_snapshot(),
    })
}

/// Validates the request before any provider call.
fn job_from_input(input: Option<CoverLetterJobInput>) -> Result<CoverLetterJob, AppError> {
    let missing = || AppError::Validation("Missing job data, title, or summary".to_string());
    let input = input.ok_or_else(missing)?;
    let title = input
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(missing)?;
    let summary = input
        .summary
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(missing)?;

    Ok(CoverLetterJob {
        title,
        summary,
        company: input.company.and_then(|c| c.display_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_from_input_requires_job() {
        assert!(matches!(
            job_from_input(None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_job_from_input_rejects_missing_title() {
        let input = CoverLetterJobInput {
            summary: Some("A fine role.".to_string()),
            ..CoverLetterJobInput::default()
        };
        assert!(matches!(
            job_from_input(Some(input)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_job_from_input_rejects_missing_summary() {
        let input = CoverLetterJobInput {
            title: Some("Engineer".to_string()),
            ..CoverLetterJobInput::default()
        };
        assert!(matches!(
            job_from_input(Some(input)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_job_from_input_flattens_company_display_name() {
        let input = CoverLetterJobInput {
            title: Some("Engineer".to_string()),
            summary: Some("A fine role.".to_string()),
            company: Some(CompanyRef {
                display_name: Some("Acme".to_string()),
            }),
        };
        let job = job_from_input(Some(input)).unwrap();
        assert_eq!(job.title, "Engineer");
        assert_eq!(job.company.as_deref(), Some("Acme"));
    }
}
