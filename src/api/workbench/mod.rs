//! Workbench endpoints - Templates, index listing and entity creation

mod entities;
mod indexes;
mod query_sets;
mod templates;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

pub use entities::{create_experiment, create_judgment, create_search_configuration, CreatedResponse};
pub use indexes::list_indexes;
pub use query_sets::{create_query_set, preview_queries, PreviewParams};
pub use templates::{list_templates, select_template, SelectTemplateRequest};

/// Routes of the workbench
pub fn create_workbench_router() -> Router<AppState> {
    Router::new()
        .route("/templates", get(list_templates))
        .route("/templates/select", post(select_template))
        .route("/indexes", get(list_indexes))
        .route("/query_sets", post(create_query_set))
        .route("/query_sets/preview", post(preview_queries))
        .route("/search_configurations", post(create_search_configuration))
        .route("/judgments", post(create_judgment))
        .route("/experiments", post(create_experiment))
}
