//! Query set endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::entities::{submit_draft, CreatedResponse};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{fields, parse_queries, QueryPreview, QueryRecord, QuerySetDraft, ValidationResult};

/// Create a sampled or uploaded query set
pub async fn create_query_set(
    State(state): State<AppState>,
    Json(draft): Json<QuerySetDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    submit_draft(&state, draft.into()).await
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub records: Vec<QueryRecord>,
    pub total: usize,
    pub truncated: bool,
}

impl From<QueryPreview> for PreviewResponse {
    fn from(preview: QueryPreview) -> Self {
        let truncated = preview.is_truncated();
        Self {
            records: preview.records,
            total: preview.total,
            truncated,
        }
    }
}

/// Parse an NDJSON upload and return the preview table, or every malformed line
pub async fn preview_queries(
    State(state): State<AppState>,
    Query(params): Query<PreviewParams>,
    body: String,
) -> Result<Json<PreviewResponse>, ApiError> {
    let limit = params.limit.unwrap_or(state.preview_limit);

    match parse_queries(&body) {
        Ok(queries) => {
            debug!(queries = queries.len(), limit, "Previewing query upload");
            Ok(Json(QueryPreview::new(&queries, limit).into()))
        }
        Err(error) => {
            let mut lines = ValidationResult::new();
            for line in &error.errors {
                lines.add(fields::QUERIES, line.to_string());
            }
            Err(ApiError::bad_request(error.to_string())
                .with_code("malformed_upload")
                .with_fields(lines))
        }
    }
}
