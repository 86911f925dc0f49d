//! Experiment template endpoints

use serde::Deserialize;

use crate::api::types::{ApiError, Json};
use crate::domain::{templates, ExperimentTemplate, Navigation};

/// Template cards in display order
pub async fn list_templates() -> Json<&'static [ExperimentTemplate]> {
    Json(templates())
}

#[derive(Debug, Deserialize)]
pub struct SelectTemplateRequest {
    pub route: String,
}

/// Resolve a clicked template card to the screen it opens
pub async fn select_template(
    Json(request): Json<SelectTemplateRequest>,
) -> Result<Json<Navigation>, ApiError> {
    crate::domain::select_template(&request.route)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No template for route '{}'", request.route)))
}
