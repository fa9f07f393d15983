use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use tasteboard_ingest::submit::{validate, SubmissionInput};
use tasteboard_ingest::ReviewSink;

use crate::state::AppState;

use super::error_response;

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub review_id: i64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ValidationErrors {
    pub success: bool,
    pub errors: Vec<String>,
}

/// Submit a review directly
///
/// Strictly validated, unlike scrape ingestion: all validation failures are
/// collected and returned together, and nothing is written on rejection. A
/// stored review triggers only the house-rating aggregation, best-effort.
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    request_body = SubmitRequest,
    responses(
        (status = 201, description = "Review stored", body = SubmitResponse),
        (status = 400, description = "Validation failures", body = ValidationErrors)
    )
)]
pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Json(input): Json<SubmissionInput>,
) -> Result<(StatusCode, Json<SubmitResponse>), Response> {
    let review = validate(&input).map_err(|errors| {
        (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrors {
                success: false,
                errors,
            }),
        )
            .into_response()
    })?;

    let review_id = state.store.insert_review(&review).await.map_err(|e| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Database error occurred: {e}"),
        )
        .into_response()
    })?;

    // Refresh the house-rating aggregate. Failing here must not fail the
    // request; the review itself is already stored.
    if let Err(e) = state
        .store
        .execute_procedures(&[&state.config.procedures.house_rating])
        .await
    {
        warn!(review_id, error = %e, "failed to refresh house ratings after submission");
    }

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: "Review submitted successfully".to_string(),
            review_id,
        }),
    ))
}

/// Schema mirror of [`SubmissionInput`] for the OpenAPI doc (the real type
/// lives in the ingest crate, which does not know about utoipa).
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct SubmitRequest {
    pub google_maps_id: String,
    pub place_name: String,
    pub review_title: String,
    pub review_text: String,
    pub review_rating: String,
    pub author_name: String,
}
