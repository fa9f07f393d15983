//! HTTP router construction.
//!
//! Assembles all Axum routes, middleware, and OpenAPI docs into a single
//! `Router`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health::health))
        .route("/scrape/runs", post(api::scrape::start_run))
        .route("/scrape/type-runs", post(api::scrape::start_type_run))
        .route("/scrape/runs/{run_id}", get(api::scrape::run_status))
        .route(
            "/scrape/runs/{run_id}/reconcile",
            post(api::scrape::reconcile_all),
        )
        .route(
            "/scrape/runs/{run_id}/reconcile-type",
            post(api::scrape::reconcile_type),
        )
        .route("/admin/reset", post(api::admin::reset))
        .route("/reviews", post(api::submit::submit_review))
        .route("/seed/file", post(api::seed::seed_from_file))
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use tasteboard_core::config::{
        Config, PostgresConfig, ProcedureConfig, ScraperConfig, ServerConfig,
    };
    use tasteboard_scrape::{
        RawReview, RunInfo, RunInput, RunStatus, ScrapeError, ScrapeJobs, StartedRun,
    };
    use tasteboard_store::PgReviewStore;

    use super::build_router;
    use crate::state::AppState;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origin: "*".to_string(),
            },
            postgres: PostgresConfig {
                host: "localhost".to_string(),
                port: 5432,
                database: "tasteboard_test".to_string(),
                username: None,
                password: None,
                ssl_mode: "prefer".to_string(),
                max_connections: 2,
            },
            scraper: ScraperConfig {
                api_token: None,
                base_url: "https://api.apify.com".to_string(),
                actor_id: "acme~review-scraper".to_string(),
                max_places: 200,
                page_size: 500,
            },
            procedures: ProcedureConfig {
                clear_db: "CALL clear_review_data()".to_string(),
                make_ratings: "CALL rebuild_ratings()".to_string(),
                make_restaurants: "CALL rebuild_restaurants()".to_string(),
                house_rating: "CALL rebuild_house_ratings()".to_string(),
            },
        }
    }

    /// State with a lazy pool: nothing here touches the database, so the
    /// connection is never actually opened.
    fn test_state(scraper: Option<Arc<dyn ScrapeJobs>>) -> Arc<AppState> {
        let config = test_config();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.postgres.connection_string())
            .expect("lazy pool");
        Arc::new(AppState {
            config,
            scraper,
            store: Arc::new(PgReviewStore::new(pool)),
        })
    }

    struct StuckScraper;

    #[async_trait]
    impl ScrapeJobs for StuckScraper {
        async fn start_run(&self, _input: &RunInput) -> Result<StartedRun, ScrapeError> {
            Ok(StartedRun {
                id: "run-1".to_string(),
                status: RunStatus::parse("READY"),
            })
        }

        async fn run_info(&self, _run_id: &str) -> Result<RunInfo, ScrapeError> {
            Ok(RunInfo {
                status: RunStatus::parse("RUNNING"),
                dataset_id: None,
            })
        }

        async fn dataset_page(
            &self,
            _dataset_id: &str,
            _offset: u32,
            _limit: u32,
        ) -> Result<Vec<RawReview>, ScrapeError> {
            Ok(Vec::new())
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_degraded_without_scraper_credential() {
        let app = build_router(test_state(None));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["scraper_configured"], false);
    }

    #[tokio::test]
    async fn health_is_ok_with_scraper_configured() {
        let app = build_router(test_state(Some(Arc::new(StuckScraper))));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn scrape_endpoints_refuse_without_credential() {
        let app = build_router(test_state(None));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/scrape/runs")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("SCRAPER_API_TOKEN"));
    }

    #[tokio::test]
    async fn reconcile_of_unfinished_run_reports_not_ready() {
        let app = build_router(test_state(Some(Arc::new(StuckScraper))));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/scrape/runs/run-1/reconcile-type?restaurant_type=italian")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["status"], "RUNNING");
        assert_eq!(json["reviews_added"], 0);
    }

    #[tokio::test]
    async fn submission_with_bad_rating_is_rejected_before_any_write() {
        let app = build_router(test_state(None));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reviews")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"google_maps_id": "abc", "review_rating": "6"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0], "review_rating must be between 1 and 5");
    }

    #[tokio::test]
    async fn seeding_from_a_missing_file_is_reported() {
        let app = build_router(test_state(None));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/seed/file")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"path": "/nonexistent/search.json"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("was not found"));
    }

    #[tokio::test]
    async fn seeding_from_an_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json at all").unwrap();

        let app = build_router(test_state(None));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/seed/file")
                    .header("content-type", "application/json")
                    .body(Body::from(format!(
                        r#"{{"path": {:?}}}"#,
                        path.to_str().unwrap()
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("could not decode JSON"));
    }
}
