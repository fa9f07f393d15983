use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use tasteboard_ingest::normalize::normalize;
use tasteboard_ingest::{IngestBatch, ReviewSink};
use tasteboard_scrape::RawReview;

use crate::state::AppState;

use super::{error_response, ErrorBody};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SeedRequest {
    /// Path to a local JSON file holding an array of raw review records.
    pub path: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SeedResponse {
    pub success: bool,
    pub message: String,
    pub reviews_added: u64,
}

/// Seed reviews from a local JSON file
///
/// Normalizes the records with the same leniency as scrape ingestion and
/// commits them as one batch. No aggregation is triggered.
#[utoipa::path(
    post,
    path = "/seed/file",
    tag = "Admin",
    request_body = SeedRequest,
    responses(
        (status = 200, description = "Records ingested", body = SeedResponse),
        (status = 404, description = "File not found", body = ErrorBody),
        (status = 400, description = "File is not valid JSON", body = ErrorBody)
    )
)]
pub async fn seed_from_file(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeedRequest>,
) -> Result<Json<SeedResponse>, (StatusCode, Json<ErrorBody>)> {
    let bytes = tokio::fs::read(&req.path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            error_response(
                StatusCode::NOT_FOUND,
                format!("the file '{}' was not found", req.path),
            )
        } else {
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to read '{}': {e}", req.path),
            )
        }
    })?;

    let records: Vec<RawReview> = serde_json::from_slice(&bytes).map_err(|e| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("could not decode JSON from '{}': {e}", req.path),
        )
    })?;

    let batch = IngestBatch {
        reviews: records.iter().map(normalize).collect(),
        restaurants: Vec::new(),
    };
    let counts = state.store.ingest_batch(&batch).await.map_err(|e| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error adding reviews: {e}"),
        )
    })?;

    info!(path = %req.path, count = counts.reviews_added, "seeded reviews from file");
    Ok(Json(SeedResponse {
        success: true,
        message: format!(
            "Successfully added {} reviews to database",
            counts.reviews_added
        ),
        reviews_added: counts.reviews_added,
    }))
}
