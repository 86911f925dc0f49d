//! Creation endpoints shared by every entity kind

use axum::{extract::State, http::StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{
    Draft, EntityId, EntityKind, ExperimentDraft, IgnoredReason, JudgmentDraft,
    SearchConfigurationDraft, SubmissionOutcome, SubmitResponse,
};

/// Body of a 201 response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub id: EntityId,
    pub entity: EntityKind,
    /// List view the screen returns to
    pub route: &'static str,
}

/// Run one creation session for a posted draft
pub(super) async fn submit_draft(
    state: &AppState,
    draft: Draft,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let kind = draft.kind();
    debug!(entity = %kind, "Creating entity");

    let session = state.session(draft);
    match session.on_submit().await? {
        SubmitResponse::Invalid { errors } => Err(ApiError::invalid_draft(errors)),
        SubmitResponse::Completed {
            outcome: SubmissionOutcome::Success { entity_id },
        } => Ok((
            StatusCode::CREATED,
            Json(CreatedResponse {
                id: entity_id,
                entity: kind,
                route: kind.list_route(),
            }),
        )),
        SubmitResponse::Completed {
            outcome: SubmissionOutcome::Failure(failure),
        } => Err(failure.into()),
        SubmitResponse::Ignored { reason } => Err(ApiError::conflict(match reason {
            IgnoredReason::InFlight => "A submission is already in progress",
            IgnoredReason::Finished | IgnoredReason::Discarded => "The submission was abandoned",
        })),
    }
}

/// Create a search configuration
pub async fn create_search_configuration(
    State(state): State<AppState>,
    Json(draft): Json<SearchConfigurationDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    submit_draft(&state, draft.into()).await
}

/// Create an LLM or UBI judgment
pub async fn create_judgment(
    State(state): State<AppState>,
    Json(draft): Json<JudgmentDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    submit_draft(&state, draft.into()).await
}

/// Create an experiment of any persisted type
pub async fn create_experiment(
    State(state): State<AppState>,
    Json(draft): Json<ExperimentDraft>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    submit_draft(&state, draft.into()).await
}
