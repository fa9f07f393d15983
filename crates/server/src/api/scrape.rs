//! Scraping-run lifecycle: start runs, poll status, reconcile results into
//! the database.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use tasteboard_ingest::{reconcile, ReconcileError, ReconcileOptions, ReconcileOutcome};
use tasteboard_scrape::RunInput;

use crate::state::AppState;

use super::{error_response, require_scraper, scrape_error, ErrorBody};

// ── Run submission ────────────────────────────────────────────

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(default)]
pub struct StartRunRequest {
    /// Crawl limit override; defaults to the configured SCRAPER_MAX_PLACES.
    pub max_places: Option<u32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StartRunResponse {
    pub success: bool,
    pub message: String,
    pub run_id: String,
    pub status: String,
}

/// Start an "all restaurants" scraping run
#[utoipa::path(
    post,
    path = "/scrape/runs",
    tag = "Scrape",
    request_body = StartRunRequest,
    responses(
        (status = 200, description = "Run started", body = StartRunResponse),
        (status = 500, description = "Scraper credential missing", body = ErrorBody)
    )
)]
pub async fn start_run(
    State(state): State<Arc<AppState>>,
    body: Option<Json<StartRunRequest>>,
) -> Result<Json<StartRunResponse>, (StatusCode, Json<ErrorBody>)> {
    let scraper = require_scraper(&state)?;
    let max_places = body
        .and_then(|Json(b)| b.max_places)
        .unwrap_or(state.config.scraper.max_places);

    let input = RunInput {
        max_crawled_places: Some(max_places),
        ..RunInput::default()
    };
    let run = scraper.start_run(&input).await.map_err(scrape_error)?;
    info!(run_id = %run.id, "review scraping run started");

    Ok(Json(StartRunResponse {
        success: true,
        message: format!("Reviews scraping run started with ID {}", run.id),
        status: run.status.as_str().to_string(),
        run_id: run.id,
    }))
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct StartTypeRunRequest {
    pub restaurant_type: String,
    #[serde(default)]
    pub max_places: Option<u32>,
}

/// Start a scraping run restricted to one restaurant type
///
/// The type tag doubles as the search keyword for the scraping actor.
#[utoipa::path(
    post,
    path = "/scrape/type-runs",
    tag = "Scrape",
    request_body = StartTypeRunRequest,
    responses(
        (status = 200, description = "Run started", body = StartRunResponse),
        (status = 400, description = "Missing restaurant_type", body = ErrorBody)
    )
)]
pub async fn start_type_run(
    State(state): State<Arc<AppState>>,
    Json(body): Json<StartTypeRunRequest>,
) -> Result<Json<StartRunResponse>, (StatusCode, Json<ErrorBody>)> {
    let scraper = require_scraper(&state)?;
    let restaurant_type = body.restaurant_type.trim().to_string();
    if restaurant_type.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "restaurant_type is required",
        ));
    }

    let input = RunInput {
        max_crawled_places: body.max_places,
        keywords: vec![restaurant_type.clone()],
        restaurant_type: Some(restaurant_type.clone()),
    };
    let run = scraper.start_run(&input).await.map_err(scrape_error)?;
    info!(run_id = %run.id, restaurant_type = %restaurant_type, "typed scraping run started");

    Ok(Json(StartRunResponse {
        success: true,
        message: format!(
            "Reviews scraping run started for {restaurant_type} restaurants with ID {}",
            run.id
        ),
        status: run.status.as_str().to_string(),
        run_id: run.id,
    }))
}

// ── Status polling ────────────────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
pub struct RunStatusResponse {
    pub success: bool,
    pub run_id: String,
    pub status: String,
    pub terminal: bool,
}

/// Poll a run's status
///
/// Returns the service's status string verbatim. Non-terminal statuses mean
/// "poll again later"; this server never waits or retries on the caller's
/// behalf.
#[utoipa::path(
    get,
    path = "/scrape/runs/{run_id}",
    tag = "Scrape",
    params(("run_id" = String, Path, description = "Run identifier")),
    responses(
        (status = 200, description = "Current status", body = RunStatusResponse),
        (status = 404, description = "Unknown run identifier", body = ErrorBody),
        (status = 400, description = "Malformed run identifier", body = ErrorBody)
    )
)]
pub async fn run_status(
    State(state): State<Arc<AppState>>,
    Path(run_id): Path<String>,
) -> Result<Json<RunStatusResponse>, (StatusCode, Json<ErrorBody>)> {
    let scraper = require_scraper(&state)?;
    let run = scraper.run_info(&run_id).await.map_err(scrape_error)?;
    Ok(Json(RunStatusResponse {
        success: true,
        run_id,
        status: run.status.as_str().to_string(),
        terminal: run.status.is_terminal(),
    }))
}

// ── Reconciliation ────────────────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
pub struct ReconcileResponse {
    pub success: bool,
    pub message: String,
    /// Current run status when the run is not ready yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub reviews_added: u64,
    pub restaurants_added: u64,
    pub restaurants_skipped: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_error: Option<String>,
}

fn reconcile_response(run_id: &str, outcome: ReconcileOutcome) -> Json<ReconcileResponse> {
    match outcome {
        ReconcileOutcome::NotReady { status } => Json(ReconcileResponse {
            success: false,
            message: format!(
                "Data is not ready for run with ID {run_id}, run status is '{status}'"
            ),
            status: Some(status),
            reviews_added: 0,
            restaurants_added: 0,
            restaurants_skipped: 0,
            aggregation_error: None,
        }),
        ReconcileOutcome::Completed(report) => {
            let message = match &report.aggregation_error {
                None => format!(
                    "Successfully added {} reviews and {} restaurants (skipped {} duplicates)",
                    report.reviews_added, report.restaurants_added, report.restaurants_skipped
                ),
                Some(err) => format!(
                    "Added {} reviews, but aggregation failed: {err}",
                    report.reviews_added
                ),
            };
            Json(ReconcileResponse {
                success: true,
                message,
                status: None,
                reviews_added: report.reviews_added,
                restaurants_added: report.restaurants_added,
                restaurants_skipped: report.restaurants_skipped,
                aggregation_error: report.aggregation_error,
            })
        }
    }
}

fn reconcile_error(err: ReconcileError) -> (StatusCode, Json<ErrorBody>) {
    match err {
        ReconcileError::Scrape(e) => scrape_error(e),
        ReconcileError::Store(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error adding reviews: {e}"),
        ),
    }
}

/// Reconcile a completed "all restaurants" run
///
/// Full-reset mode: clears all existing data, ingests the run's dataset,
/// then rebuilds the rating aggregates and the restaurant table.
#[utoipa::path(
    post,
    path = "/scrape/runs/{run_id}/reconcile",
    tag = "Scrape",
    params(("run_id" = String, Path, description = "Run identifier")),
    responses(
        (status = 200, description = "Ingest summary or not-ready notice", body = ReconcileResponse),
        (status = 500, description = "Persistence failure, batch rolled back", body = ErrorBody)
    )
)]
pub async fn reconcile_all(
    State(state): State<Arc<AppState>>,
    Path(run_id): Path<String>,
) -> Result<Json<ReconcileResponse>, (StatusCode, Json<ErrorBody>)> {
    let scraper = require_scraper(&state)?;
    let opts = ReconcileOptions {
        restaurant_type: None,
        reset_first: true,
        page_size: state.config.scraper.page_size,
    };
    let outcome = reconcile(
        scraper.as_ref(),
        state.store.as_ref(),
        &state.config.procedures,
        &run_id,
        &opts,
    )
    .await
    .map_err(reconcile_error)?;
    Ok(reconcile_response(&run_id, outcome))
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct TypeParams {
    pub restaurant_type: String,
}

/// Reconcile a completed typed run
///
/// Ingests on top of the existing data, adding a restaurant row per new
/// (place, type) pair and skipping pairs already present. Only the rating
/// aggregates are rebuilt.
#[utoipa::path(
    post,
    path = "/scrape/runs/{run_id}/reconcile-type",
    tag = "Scrape",
    params(
        ("run_id" = String, Path, description = "Run identifier"),
        ("restaurant_type" = String, Query, description = "Type tag for the ingested places")
    ),
    responses(
        (status = 200, description = "Ingest summary or not-ready notice", body = ReconcileResponse),
        (status = 400, description = "Missing restaurant_type", body = ErrorBody)
    )
)]
pub async fn reconcile_type(
    State(state): State<Arc<AppState>>,
    Path(run_id): Path<String>,
    Query(params): Query<TypeParams>,
) -> Result<Json<ReconcileResponse>, (StatusCode, Json<ErrorBody>)> {
    let scraper = require_scraper(&state)?;
    let restaurant_type = params.restaurant_type.trim().to_string();
    if restaurant_type.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "restaurant_type is required",
        ));
    }

    let opts = ReconcileOptions {
        restaurant_type: Some(restaurant_type),
        reset_first: false,
        page_size: state.config.scraper.page_size,
    };
    let outcome = reconcile(
        scraper.as_ref(),
        state.store.as_ref(),
        &state.config.procedures,
        &run_id,
        &opts,
    )
    .await
    .map_err(reconcile_error)?;
    Ok(reconcile_response(&run_id, outcome))
}
