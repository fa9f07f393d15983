use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;

use tasteboard_ingest::ReviewSink;

use crate::state::AppState;

use super::{error_response, ErrorBody};

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Wipe all review data
///
/// Standalone maintenance operation running the configured clear-database
/// procedure. Never triggered implicitly by normal ingestion.
#[utoipa::path(
    post,
    path = "/admin/reset",
    tag = "Admin",
    responses(
        (status = 200, description = "Database cleaned", body = MessageResponse),
        (status = 500, description = "Procedure failed", body = ErrorBody)
    )
)]
pub async fn reset(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<ErrorBody>)> {
    state
        .store
        .execute_procedures(&[&state.config.procedures.clear_db])
        .await
        .map_err(|e| {
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error cleaning the database: {e}"),
            )
        })?;
    info!("database cleaned via admin reset");
    Ok(Json(MessageResponse {
        success: true,
        message: "Successfully cleaned the database".to_string(),
    }))
}
