use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use tasteboard_core::config::ScraperConfig;

use crate::error::{classify_run_error, ScrapeError};
use crate::status::RunStatus;
use crate::types::{RawReview, RunInfo, RunInput, StartedRun};

/// Boundary to the asynchronous scraping-job service.
///
/// All methods are read-only except [`start_run`](ScrapeJobs::start_run).
/// No retry or backoff happens here; polling cadence is the caller's
/// responsibility.
#[async_trait]
pub trait ScrapeJobs: Send + Sync {
    /// Submit a new scraping run and return its identifier.
    async fn start_run(&self, input: &RunInput) -> Result<StartedRun, ScrapeError>;

    /// Look up a run's current status and result dataset.
    async fn run_info(&self, run_id: &str) -> Result<RunInfo, ScrapeError>;

    /// Fetch one page of a run's result dataset.
    async fn dataset_page(
        &self,
        dataset_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<RawReview>, ScrapeError>;
}

// ── HTTP implementation ───────────────────────────────────────

/// Wire format of the service's run envelope.
#[derive(Deserialize)]
struct RunEnvelope {
    data: RunData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunData {
    id: String,
    status: String,
    #[serde(default)]
    default_dataset_id: Option<String>,
}

pub struct ApifyClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
    actor_id: String,
}

impl ApifyClient {
    pub fn new(base_url: String, token: String, actor_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            actor_id,
        }
    }

    /// Build a client from config; fails when the API token is absent so the
    /// caller can refuse scrape operations before any side effect.
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let token = config
            .api_token
            .clone()
            .ok_or(ScrapeError::NotConfigured("SCRAPER_API_TOKEN is not set"))?;
        Ok(Self::new(
            config.base_url.clone(),
            token,
            config.actor_id.clone(),
        ))
    }
}

#[async_trait]
impl ScrapeJobs for ApifyClient {
    async fn start_run(&self, input: &RunInput) -> Result<StartedRun, ScrapeError> {
        let url = format!("{}/v2/acts/{}/runs", self.base_url, self.actor_id);
        debug!(%url, "starting scraping run");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Api { status, body });
        }

        let envelope: RunEnvelope = response
            .json()
            .await
            .map_err(|e| ScrapeError::Parse(e.to_string()))?;
        Ok(StartedRun {
            id: envelope.data.id,
            status: RunStatus::parse(&envelope.data.status),
        })
    }

    async fn run_info(&self, run_id: &str) -> Result<RunInfo, ScrapeError> {
        let url = format!("{}/v2/actor-runs/{}", self.base_url, run_id);
        debug!(%url, "polling run status");

        let response = self.client.get(&url).bearer_auth(&self.token).send().await?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_run_error(run_id, status, body));
        }

        let envelope: RunEnvelope = response
            .json()
            .await
            .map_err(|e| ScrapeError::Parse(e.to_string()))?;
        Ok(RunInfo {
            status: RunStatus::parse(&envelope.data.status),
            dataset_id: envelope.data.default_dataset_id,
        })
    }

    async fn dataset_page(
        &self,
        dataset_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<RawReview>, ScrapeError> {
        let url = format!("{}/v2/datasets/{}/items", self.base_url, dataset_id);
        debug!(%url, offset, limit, "fetching dataset page");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("format", "json"), ("clean", "true")])
            .query(&[("offset", offset), ("limit", limit)])
            .send()
            .await?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Api { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| ScrapeError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApifyClient {
        ApifyClient::new(
            server.uri(),
            "test-token".to_string(),
            "acme~review-scraper".to_string(),
        )
    }

    #[tokio::test]
    async fn start_run_posts_input_and_returns_run_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/acts/acme~review-scraper/runs"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "data": { "id": "run-123", "status": "READY" }
            })))
            .mount(&server)
            .await;

        let run = client_for(&server)
            .start_run(&RunInput {
                max_crawled_places: Some(200),
                ..RunInput::default()
            })
            .await
            .unwrap();
        assert_eq!(run.id, "run-123");
        assert!(!run.status.is_terminal());
    }

    #[tokio::test]
    async fn run_info_parses_status_and_dataset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/actor-runs/run-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "id": "run-123",
                    "status": "SUCCEEDED",
                    "defaultDatasetId": "ds-9"
                }
            })))
            .mount(&server)
            .await;

        let info = client_for(&server).run_info("run-123").await.unwrap();
        assert_eq!(info.status, RunStatus::Succeeded);
        assert_eq!(info.dataset_id.as_deref(), Some("ds-9"));
    }

    #[tokio::test]
    async fn run_info_classifies_unknown_identifier() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/actor-runs/nope"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string("Run with id 'nope' does not exist"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).run_info("nope").await.unwrap_err();
        assert!(matches!(err, ScrapeError::RunNotFound(id) if id == "nope"));
    }

    #[tokio::test]
    async fn run_info_classifies_malformed_identifier() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/actor-runs/bad-id"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("run id is badly formed"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).run_info("bad-id").await.unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedRunId(_)));
    }

    #[tokio::test]
    async fn dataset_page_passes_paging_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/datasets/ds-9/items"))
            .and(query_param("offset", "500"))
            .and(query_param("limit", "500"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "placeName": "Maison Selby", "reviewRating": 5 }
            ])))
            .mount(&server)
            .await;

        let page = client_for(&server)
            .dataset_page("ds-9", 500, 500)
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].place_name.as_deref(), Some("Maison Selby"));
    }
}
