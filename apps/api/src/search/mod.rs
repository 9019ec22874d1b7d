// Job search provider. The trait is the seam the enrichment pipeline calls
// through; `adzuna.rs` is the production backend.

pub mod adzuna;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },
}

/// Company reference as returned by the search provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRef {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Location reference as returned by the search provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRef {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A raw job posting from the search provider. Immutable once fetched.
///
/// Field names match the Adzuna response shape so the struct deserializes
/// the provider payload directly. The description may be large and
/// HTML-laden; it is passed to the summarizer untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
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

/// The job search seam. Implement this to swap providers without touching
/// the pipeline; tests substitute in-memory fakes.
///
/// Carried in the pipeline as `Arc<dyn JobSearch>`.
#[async_trait]
pub trait JobSearch: Send + Sync {
    /// Returns postings for a keyword, in provider order. The keyword is
    /// forwarded as-is — an empty keyword is the provider's problem, not
    /// ours.
    async fn search(&self, keyword: &str) -> Result<Vec<JobPosting>, SearchError>;
}
