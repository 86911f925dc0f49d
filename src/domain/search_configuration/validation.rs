//! Search configuration validation

use serde_json::Value;
use thiserror::Error;

use super::SearchConfigurationDraft;
use crate::domain::draft::field::fields;
use crate::domain::validation::{FieldError, ValidationResult};

/// Validation errors for search configurations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchConfigurationValidationError {
    #[error("Search Configuration Name is a required parameter.")]
    NameRequired,

    #[error("Query is required.")]
    QueryRequired,

    #[error("Query must be valid JSON: {0}")]
    InvalidQueryJson(String),

    #[error("Query must be a JSON object.")]
    QueryNotObject,

    #[error("Please select an index.")]
    IndexRequired,
}

impl FieldError for SearchConfigurationValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => fields::NAME,
            Self::QueryRequired | Self::InvalidQueryJson(_) | Self::QueryNotObject => fields::QUERY,
            Self::IndexRequired => fields::INDEX,
        }
    }
}

/// Validate a search configuration draft, collecting every violation
pub fn validate_search_configuration(draft: &SearchConfigurationDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    if draft.name.trim().is_empty() {
        result.push(SearchConfigurationValidationError::NameRequired);
    }

    if let Err(error) = validate_query_body(&draft.query) {
        result.push(error);
    }

    if draft.index.as_deref().is_none_or(|index| index.trim().is_empty()) {
        result.push(SearchConfigurationValidationError::IndexRequired);
    }

    result
}

/// Check that the query editor text is a JSON object
pub fn validate_query_body(query: &str) -> Result<(), SearchConfigurationValidationError> {
    if query.trim().is_empty() {
        return Err(SearchConfigurationValidationError::QueryRequired);
    }

    match serde_json::from_str::<Value>(query) {
        Ok(Value::Object(_)) => Ok(()),
        Ok(_) => Err(SearchConfigurationValidationError::QueryNotObject),
        Err(e) => Err(SearchConfigurationValidationError::InvalidQueryJson(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> SearchConfigurationDraft {
        SearchConfigurationDraft {
            name: "Test Configuration".to_string(),
            query: r#"{ "query": { "match_all": {} } }"#.to_string(),
            index: Some("ecommerce".to_string()),
            search_pipeline: None,
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_search_configuration(&valid_draft()).is_valid());
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let result = validate_search_configuration(&SearchConfigurationDraft::new());

        assert_eq!(
            result.field_errors("name"),
            &["Search Configuration Name is a required parameter."]
        );
        assert_eq!(result.field_errors("query"), &["Query is required."]);
        assert_eq!(result.field_errors("index"), &["Please select an index."]);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_malformed_query() {
        let mut draft = valid_draft();
        draft.query = r#"{ "query": { "match_all": {} }"#.to_string();

        let result = validate_search_configuration(&draft);
        let messages = result.field_errors("query");
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Query must be valid JSON: "));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_query_must_be_object() {
        assert_eq!(
            validate_query_body("[1, 2]"),
            Err(SearchConfigurationValidationError::QueryNotObject)
        );
        assert_eq!(
            validate_query_body("   "),
            Err(SearchConfigurationValidationError::QueryRequired)
        );
    }
}
