//! Raw field values coming from form inputs

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Field names used by the creation forms
pub mod fields {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const CREATION_MODE: &str = "creationMode";
    pub const SAMPLING_METHOD: &str = "samplingMethod";
    pub const SIZE: &str = "size";
    pub const QUERIES: &str = "queries";
    pub const QUERY: &str = "query";
    pub const INDEX: &str = "index";
    pub const SEARCH_PIPELINE: &str = "searchPipeline";
    pub const TYPE: &str = "type";
    pub const MODEL_ID: &str = "modelId";
    pub const QUERY_SET_ID: &str = "querySetId";
    pub const SEARCH_CONFIGURATION_LIST: &str = "searchConfigurationList";
    pub const JUDGMENT_LIST: &str = "judgmentList";
    pub const TOKEN_LIMIT: &str = "tokenLimit";
    pub const CONTEXT_FIELDS: &str = "contextFields";
    pub const IGNORE_FAILURE: &str = "ignoreFailure";
    pub const CLICK_MODEL: &str = "clickModel";
    pub const MAX_RANK: &str = "maxRank";
}

/// A value typed, selected or toggled by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Text content; numbers are rendered as typed
    pub fn into_text(self, field: &str) -> Result<String, DomainError> {
        match self {
            FieldValue::Text(text) => Ok(text),
            FieldValue::Number(n) => Ok(n.to_string()),
            other => Err(mismatch(field, "text", &other)),
        }
    }

    /// Text content, with blank input meaning "nothing selected"
    pub fn into_optional_text(self, field: &str) -> Result<Option<String>, DomainError> {
        let text = self.into_text(field)?;
        let trimmed = text.trim();

        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    /// Integer content. A cleared number input yields `None`.
    pub fn into_number(self, field: &str) -> Result<Option<i64>, DomainError> {
        match self {
            FieldValue::Number(n) => Ok(Some(n)),
            FieldValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed.parse::<i64>().map(Some).map_err(|_| {
                    DomainError::validation(format!(
                        "Field '{}' expects a whole number, got '{}'",
                        field, trimmed
                    ))
                })
            }
            other => Err(mismatch(field, "number", &other)),
        }
    }

    pub fn into_flag(self, field: &str) -> Result<bool, DomainError> {
        match self {
            FieldValue::Flag(flag) => Ok(flag),
            FieldValue::Text(text) => match text.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(DomainError::validation(format!(
                    "Field '{}' expects true or false, got '{}'",
                    field, other
                ))),
            },
            other => Err(mismatch(field, "flag", &other)),
        }
    }

    /// Multi-select content. A single text value is a comma-separated list.
    pub fn into_list(self, field: &str) -> Result<Vec<String>, DomainError> {
        let items = match self {
            FieldValue::List(items) => items,
            FieldValue::Text(text) => text.split(',').map(str::to_string).collect(),
            other => return Err(mismatch(field, "list", &other)),
        };

        let mut unique: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            let item = item.trim();
            if !item.is_empty() && !unique.iter().any(|existing| existing == item) {
                unique.push(item.to_string());
            }
        }

        Ok(unique)
    }

    fn kind(&self) -> &'static str {
        match self {
            FieldValue::Flag(_) => "flag",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
            FieldValue::List(_) => "list",
        }
    }
}

fn mismatch(field: &str, expected: &str, actual: &FieldValue) -> DomainError {
    DomainError::validation(format!(
        "Field '{}' expects a {} value, got a {}",
        field,
        expected,
        actual.kind()
    ))
}

pub(crate) fn unknown_field(kind: &str, field: &str) -> DomainError {
    DomainError::validation(format!("Unknown field '{}' for {}", field, kind))
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_from_typed_text() {
        assert_eq!(FieldValue::from("10").into_number("size"), Ok(Some(10)));
        assert_eq!(FieldValue::from(" ").into_number("size"), Ok(None));
        assert!(FieldValue::from("ten").into_number("size").is_err());
    }

    #[test]
    fn test_list_deduplicates_and_trims() {
        let value = FieldValue::from(vec!["a", " b ", "a", ""]);
        assert_eq!(
            value.into_list("searchConfigurationList").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );

        let value = FieldValue::from("x, y");
        assert_eq!(value.into_list("judgmentList").unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(FieldValue::from("  ").into_optional_text("index"), Ok(None));
        assert_eq!(
            FieldValue::from("products").into_optional_text("index"),
            Ok(Some("products".to_string()))
        );
    }

    #[test]
    fn test_type_mismatch() {
        let err = FieldValue::from(true).into_text("name").unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("Field 'name' expects a text value, got a flag")
        );
    }

    #[test]
    fn test_untagged_deserialization() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[true, 3, "x", ["a"]]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Flag(true),
                FieldValue::Number(3),
                FieldValue::Text("x".to_string()),
                FieldValue::List(vec!["a".to_string()]),
            ]
        );
    }
}
