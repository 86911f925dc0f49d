//! Request bodies for the search relevance REST API

use reqwest::Method;
use serde_json::{json, Value};

use crate::domain::experiment::ExperimentDraft;
use crate::domain::judgment::{JudgmentDraft, JudgmentKind};
use crate::domain::query_set::{CreationMode, QuerySetDraft};
use crate::domain::search_configuration::SearchConfigurationDraft;
use crate::domain::{DomainError, EntityId};

pub const QUERY_SETS_PATH: &str = "/_plugins/_search_relevance/query_sets";
pub const SEARCH_CONFIGURATIONS_PATH: &str = "/_plugins/_search_relevance/search_configurations";
pub const JUDGMENTS_PATH: &str = "/_plugins/_search_relevance/judgments";
pub const EXPERIMENTS_PATH: &str = "/_plugins/_search_relevance/experiments";
pub const CAT_INDICES_PATH: &str = "/_cat/indices?format=json";

/// Method, path and body of one creation request
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    pub method: Method,
    pub path: &'static str,
    pub body: Value,
    /// Response field holding the new identifier
    pub id_field: &'static str,
}

/// Sampled query sets are created with POST, uploaded ones with PUT
pub fn query_set_request(draft: &QuerySetDraft) -> CreateRequest {
    let (method, body) = match &draft.mode {
        CreationMode::Auto {
            sampling_method,
            size,
        } => (
            Method::POST,
            json!({
                "name": draft.name.trim(),
                "description": draft.description.trim(),
                "sampling": sampling_method.as_str(),
                "querySetSize": size,
            }),
        ),
        CreationMode::Manual { queries } => (
            Method::PUT,
            json!({
                "name": draft.name.trim(),
                "description": draft.description.trim(),
                "sampling": "manual",
                "querySetQueries": queries,
            }),
        ),
    };

    CreateRequest {
        method,
        path: QUERY_SETS_PATH,
        body,
        id_field: "query_set_id",
    }
}

pub fn search_configuration_request(draft: &SearchConfigurationDraft) -> CreateRequest {
    let mut body = json!({
        "name": draft.name.trim(),
        "index": draft.index,
        "query": draft.query,
    });
    if let Some(pipeline) = &draft.search_pipeline {
        body["searchPipeline"] = json!(pipeline);
    }

    CreateRequest {
        method: Method::PUT,
        path: SEARCH_CONFIGURATIONS_PATH,
        body,
        id_field: "search_configuration_id",
    }
}

pub fn judgment_request(draft: &JudgmentDraft) -> CreateRequest {
    let body = match &draft.kind {
        JudgmentKind::Llm(llm) => json!({
            "name": draft.name.trim(),
            "type": draft.kind.judgment_type(),
            "modelId": llm.model_id,
            "querySetId": llm.query_set_ref,
            "searchConfigurationList": llm.search_configuration_refs,
            "size": llm.size,
            "tokenLimit": llm.token_limit,
            "contextFields": llm.context_fields,
            "ignoreFailure": llm.ignore_failure,
        }),
        JudgmentKind::Ubi(ubi) => json!({
            "name": draft.name.trim(),
            "type": draft.kind.judgment_type(),
            "clickModel": ubi.click_model,
            "maxRank": ubi.max_rank,
        }),
    };

    CreateRequest {
        method: Method::PUT,
        path: JUDGMENTS_PATH,
        body,
        id_field: "judgment_id",
    }
}

pub fn experiment_request(draft: &ExperimentDraft) -> CreateRequest {
    let mut body = json!({
        "type": draft.experiment_type(),
        "querySetId": draft.query_set_ref,
        "searchConfigurationList": draft.kind.search_configuration_refs(),
        "size": draft.size,
    });
    if let Some(judgments) = draft.kind.judgment_refs() {
        body["judgmentList"] = json!(judgments);
    }

    CreateRequest {
        method: Method::PUT,
        path: EXPERIMENTS_PATH,
        body,
        id_field: "experiment_id",
    }
}

/// Read the created identifier, falling back to a plain `id` field
pub fn extract_entity_id(response: &Value, id_field: &str) -> Result<EntityId, DomainError> {
    [id_field, "id"]
        .iter()
        .find_map(|key| response.get(*key).and_then(Value::as_str))
        .map(EntityId::new)
        .ok_or_else(|| {
            DomainError::transport(format!(
                "Response did not contain '{}': {}",
                id_field, response
            ))
        })
}

/// Reason given by the cluster in an error body, if any
pub fn error_reason(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(reason) => Some(reason.clone()),
        error => error
            .get("reason")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}
