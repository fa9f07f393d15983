//! Request handlers, grouped by concern.

pub mod admin;
pub mod doc;
pub mod health;
pub mod scrape;
pub mod seed;
pub mod submit;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use tasteboard_scrape::{ScrapeError, ScrapeJobs};

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

pub fn error_response(
    status: StatusCode,
    error: impl Into<String>,
) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            success: false,
            error: error.into(),
        }),
    )
}

/// Configuration guard: scrape endpoints refuse before any side effect when
/// the service credential is absent.
pub fn require_scraper(
    state: &AppState,
) -> Result<Arc<dyn ScrapeJobs>, (StatusCode, Json<ErrorBody>)> {
    state.scraper.clone().ok_or_else(|| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "SCRAPER_API_TOKEN not configured in environment variables",
        )
    })
}

/// Map scrape-service failures onto the HTTP surface, keeping the
/// descriptive classified message.
pub fn scrape_error(err: ScrapeError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &err {
        ScrapeError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ScrapeError::RunNotFound(_) => StatusCode::NOT_FOUND,
        ScrapeError::MalformedRunId(_) => StatusCode::BAD_REQUEST,
        ScrapeError::Http(_) | ScrapeError::Api { .. } | ScrapeError::Parse(_) => {
            StatusCode::BAD_GATEWAY
        }
    };
    error_response(status, err.to_string())
}
