use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub scraper_configured: bool,
}

/// Service health
///
/// Reports "degraded" (503) when the scraping-service credential is missing,
/// since ingestion cannot run without it.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Scraper credential missing", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let configured = state.scraper.is_some();
    let (code, label) = if configured {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    (
        code,
        Json(HealthResponse {
            status: label,
            version: env!("CARGO_PKG_VERSION"),
            scraper_configured: configured,
        }),
    )
}
