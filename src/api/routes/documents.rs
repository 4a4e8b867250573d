use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub indexed: usize,
}

pub async fn ingest_documents(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, StatusCode> {
    let indexed = state
        .ingest_service
        .ingest(&request.content, "api")
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to index documents");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(IngestResponse { indexed }))
}
