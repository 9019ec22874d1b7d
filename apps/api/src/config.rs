use anyhow::{Context, Result};

use crate::enrichment::pipeline::DEFAULT_BATCH_SIZE;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub adzuna_base_url: String,
    pub adzuna_country: String,
    pub adzuna_app_id: String,
    pub adzuna_app_key: String,
    pub anthropic_api_key: String,
    /// Result cap per search call. Pagination and freshness are
    /// caller-configured constants, not part of the per-call contract.
    pub results_per_page: u32,
    /// Freshness window in days for search results.
    pub max_days_old: u32,
    /// Number of postings summarized concurrently per batch.
    pub batch_size: usize,
    /// Maximum entries held by the summary cache before FIFO eviction.
    pub cache_capacity: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            adzuna_base_url: std::env::var("ADZUNA_BASE_URL")
                .unwrap_or_else(|_| "https://api.adzuna.com/v1/api/jobs".to_string()),
            adzuna_country: std::env::var("ADZUNA_COUNTRY").unwrap_or_else(|_| "us".to_string()),
            adzuna_app_id: require_env("ADZUNA_APP_ID")?,
            adzuna_app_key: require_env("ADZUNA_APP_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            results_per_page: parse_env("ADZUNA_RESULTS_PER_PAGE", 20)?,
            max_days_old: parse_env("ADZUNA_MAX_DAYS_OLD", 1)?,
            batch_size: parse_env("SUMMARY_BATCH_SIZE", DEFAULT_BATCH_SIZE)?,
            cache_capacity: parse_env("SUMMARY_CACHE_CAPACITY", 1024)?,
            port: parse_env("PORT", 8001)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' must be a valid number")),
        Err(_) => Ok(default),
    }
}
