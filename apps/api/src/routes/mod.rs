pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cover_letter::handlers as cover_letter;
use crate::enrichment::handlers as enrichment;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job search + enrichment
        .route("/api/v1/jobs/search", post(enrichment::handle_search_jobs))
        .route("/api/v1/jobs/metrics", get(enrichment::handle_get_metrics))
        .route(
            "/api/v1/jobs/metrics/reset",
            post(enrichment::handle_reset_metrics),
        )
        // Single-job summarization
        .route("/api/v1/summarize", post(enrichment::handle_summarize))
        .route(
            "/api/v1/summarize/metrics",
            get(enrichment::handle_summarize_metrics),
        )
        // Cover letters
        .route(
            "/api/v1/cover-letter",
            post(cover_letter::handle_generate_cover_letter),
        )
        .route(
            "/api/v1/cover-letter/metrics",
            get(cover_letter::handle_cover_letter_metrics),
        )
        .with_state(state)
}
