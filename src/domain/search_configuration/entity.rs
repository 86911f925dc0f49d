//! Search configuration draft

use serde::{Deserialize, Serialize};

use crate::domain::draft::field::{fields, unknown_field, FieldValue};
use crate::domain::DomainError;

/// Search configuration being filled in on the creation screen.
///
/// `query` holds the editor text as typed; it is only parsed by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfigurationDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_pipeline: Option<String>,
}

impl SearchConfigurationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single form change
    pub fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), DomainError> {
        match field {
            fields::NAME => self.name = value.into_text(field)?,
            fields::QUERY => self.query = value.into_text(field)?,
            fields::INDEX => self.index = value.into_optional_text(field)?,
            fields::SEARCH_PIPELINE => self.search_pipeline = value.into_optional_text(field)?,
            _ => return Err(unknown_field("search configuration", field)),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_fields() {
        let mut draft = SearchConfigurationDraft::new();
        draft.set_field(fields::NAME, "Test Configuration".into()).unwrap();
        draft
            .set_field(fields::QUERY, r#"{ "query": { "match_all": {} } }"#.into())
            .unwrap();
        draft.set_field(fields::INDEX, "ecommerce".into()).unwrap();

        assert_eq!(draft.name, "Test Configuration");
        assert_eq!(draft.index.as_deref(), Some("ecommerce"));
        assert!(draft.search_pipeline.is_none());
    }

    #[test]
    fn test_clearing_index() {
        let mut draft = SearchConfigurationDraft::new();
        draft.set_field(fields::INDEX, "ecommerce".into()).unwrap();
        draft.set_field(fields::INDEX, "".into()).unwrap();
        assert!(draft.index.is_none());
    }

    #[test]
    fn test_unknown_field() {
        let mut draft = SearchConfigurationDraft::new();
        assert!(draft.set_field(fields::MODEL_ID, "m".into()).is_err());
    }
}
