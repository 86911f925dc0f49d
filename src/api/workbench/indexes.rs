use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::IndexInfo;

/// Indexes a search configuration may target
pub async fn list_indexes(State(state): State<AppState>) -> Result<Json<Vec<IndexInfo>>, ApiError> {
    Ok(Json(state.catalog.list_indexes().await?))
}
