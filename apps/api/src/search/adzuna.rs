//! Adzuna search backend — GET `{base}/{country}/search/1` with app
//! credentials and caller-configured result constants.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;

use super::{JobPosting, JobSearch, SearchError};

/// Per-call timeout for the search provider. A hung search fails the whole
/// enrich call rather than stalling it indefinitely.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: Vec<JobPosting>,
}

pub struct AdzunaClient {
    client: Client,
    base_url: String,
    country: String,
    app_id: String,
    app_key: String,
    results_per_page: u32,
    max_days_old: u32,
}

impl AdzunaClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.adzuna_base_url.clone(),
            country: config.adzuna_country.clone(),
            app_id: config.adzuna_app_id.clone(),
            app_key: config.adzuna_app_key.clone(),
            results_per_page: config.results_per_page,
            max_days_old: config.max_days_old,
        }
    }
}

#[async_trait]
impl JobSearch for AdzunaClient {
    async fn search(&self, keyword: &str) -> Result<Vec<JobPosting>, SearchError> {
        let url = format!("{}/{}/search/1", self.base_url, self.country);
        let results_per_page = self.results_per_page.to_string();
        let max_days_old = self.max_days_old.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("what", keyword),
                ("results_per_page", results_per_page.as_str()),
                ("max_days_old", max_days_old.as_str()),
                ("sort_by", "date"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: SearchEnvelope = response.json().await?;
        debug!(
            "search returned {} postings for keyword {keyword:?}",
            envelope.results.len()
        );

        Ok(envelope.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> Config {
        Config {
            adzuna_base_url: base_url,
            adzuna_country: "us".to_string(),
            adzuna_app_id: "id".to_string(),
            adzuna_app_key: "key".to_string(),
            anthropic_api_key: "unused".to_string(),
            results_per_page: 20,
            max_days_old: 1,
            batch_size: 5,
            cache_capacity: 1024,
            port: 8001,
            rust_log: "info".to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_sends_expected_query_and_decodes_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/us/search/1"))
            .and(query_param("app_id", "id"))
            .and(query_param("app_key", "key"))
            .and(query_param("what", "Full-Stack Engineer"))
            .and(query_param("results_per_page", "20"))
            .and(query_param("max_days_old", "1"))
            .and(query_param("sort_by", "date"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {
                        "id": "4001",
                        "title": "Full-Stack Engineer",
                        "description": "Build things.",
                        "company": {"display_name": "Acme"},
                        "location": {"display_name": "Remote"},
                        "created": "2025-08-01T09:30:00Z",
                        "salary_min": 90000.0,
                        "salary_max": 120000.0,
                        "redirect_url": "https://example.com/4001"
                    },
                    {
                        "id": "4002",
                        "title": "Backend Engineer",
                        "description": "More things."
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = AdzunaClient::new(&test_config(server.uri()));
        let postings = client.search("Full-Stack Engineer").await.unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].id, "4001");
        assert_eq!(
            postings[0].company.as_ref().unwrap().display_name.as_deref(),
            Some("Acme")
        );
        assert!(postings[0].created.is_some());
        // Sparse postings still decode — optional fields default to None.
        assert_eq!(postings[1].id, "4002");
        assert!(postings[1].company.is_none());
        assert!(postings[1].salary_min.is_none());
    }

    #[tokio::test]
    async fn test_search_maps_http_failure_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("invalid app_key"))
            .mount(&server)
            .await;

        let client = AdzunaClient::new(&test_config(server.uri()));
        let err = client.search("rust").await.unwrap_err();

        match err {
            SearchError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "invalid app_key");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_maps_malformed_body_to_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = AdzunaClient::new(&test_config(server.uri()));
        let err = client.search("rust").await.unwrap_err();

        assert!(matches!(err, SearchError::Http(_)));
    }
}
