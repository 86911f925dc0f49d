//! Query set draft and related types

use serde::{Deserialize, Serialize};

use crate::domain::draft::field::{fields, unknown_field, FieldValue};
use crate::domain::DomainError;

/// Size used by a fresh sampled query set
pub const DEFAULT_QUERY_SET_SIZE: i64 = 10;

/// How queries are sampled from user behavior data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingMethod {
    #[default]
    #[serde(rename = "random")]
    Random,
    #[serde(rename = "topN")]
    TopN,
}

impl SamplingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SamplingMethod::Random => "random",
            SamplingMethod::TopN => "topN",
        }
    }
}

impl std::fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SamplingMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "random" => Ok(SamplingMethod::Random),
            "topN" => Ok(SamplingMethod::TopN),
            other => Err(DomainError::validation(format!(
                "Unknown sampling method '{}'",
                other
            ))),
        }
    }
}

/// A single query of a manually built query set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecord {
    pub query_text: String,
    pub reference_answer: String,
}

impl QueryRecord {
    pub fn new(query_text: impl Into<String>, reference_answer: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            reference_answer: reference_answer.into(),
        }
    }
}

/// Discriminant of [`CreationMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModeKind {
    Auto,
    Manual,
}

impl std::str::FromStr for ModeKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "AUTO" => Ok(ModeKind::Auto),
            "MANUAL" => Ok(ModeKind::Manual),
            other => Err(DomainError::validation(format!(
                "Unknown creation mode '{}'",
                other
            ))),
        }
    }
}

/// How the queries of a query set are obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "creationMode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreationMode {
    /// Sampled by the backend from recorded user queries
    #[serde(rename_all = "camelCase")]
    Auto {
        #[serde(default)]
        sampling_method: SamplingMethod,
        #[serde(default)]
        size: Option<i64>,
    },
    /// Uploaded by the user as NDJSON
    Manual {
        #[serde(default)]
        queries: Vec<QueryRecord>,
    },
}

impl CreationMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            CreationMode::Auto { .. } => ModeKind::Auto,
            CreationMode::Manual { .. } => ModeKind::Manual,
        }
    }

    /// Blank inputs for a mode the user just switched to
    fn blank(kind: ModeKind) -> Self {
        match kind {
            ModeKind::Auto => CreationMode::Auto {
                sampling_method: SamplingMethod::default(),
                size: None,
            },
            ModeKind::Manual => CreationMode::Manual {
                queries: Vec::new(),
            },
        }
    }
}

impl Default for CreationMode {
    fn default() -> Self {
        CreationMode::Auto {
            sampling_method: SamplingMethod::default(),
            size: Some(DEFAULT_QUERY_SET_SIZE),
        }
    }
}

/// Query set being filled in on the creation screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QuerySetForm")]
pub struct QuerySetDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub mode: CreationMode,
}

/// Posted query set form; a missing `creationMode` means a fresh sampled draft
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuerySetForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    creation_mode: Option<ModeKind>,
    #[serde(default)]
    sampling_method: SamplingMethod,
    #[serde(default)]
    size: Option<i64>,
    #[serde(default)]
    queries: Vec<QueryRecord>,
}

impl From<QuerySetForm> for QuerySetDraft {
    fn from(form: QuerySetForm) -> Self {
        let mode = match form.creation_mode {
            None => CreationMode::Auto {
                sampling_method: form.sampling_method,
                size: form.size.or(Some(DEFAULT_QUERY_SET_SIZE)),
            },
            Some(ModeKind::Auto) => CreationMode::Auto {
                sampling_method: form.sampling_method,
                size: form.size,
            },
            Some(ModeKind::Manual) => CreationMode::Manual {
                queries: form.queries,
            },
        };
        Self {
            name: form.name,
            description: form.description,
            mode,
        }
    }
}

impl QuerySetDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch creation mode, discarding the fields of the previous mode.
    ///
    /// Switching to the current mode leaves the draft untouched.
    pub fn with_mode(mut self, kind: ModeKind) -> Self {
        if self.mode.kind() != kind {
            self.mode = CreationMode::blank(kind);
        }
        self
    }

    /// Replace the uploaded queries, entering manual mode if needed
    pub fn with_queries(self, queries: Vec<QueryRecord>) -> Self {
        let mut draft = self.with_mode(ModeKind::Manual);
        draft.mode = CreationMode::Manual { queries };
        draft
    }

    pub fn queries(&self) -> &[QueryRecord] {
        match &self.mode {
            CreationMode::Manual { queries } => queries,
            CreationMode::Auto { .. } => &[],
        }
    }

    /// Apply a single form change
    pub fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), DomainError> {
        match field {
            fields::NAME => self.name = value.into_text(field)?,
            fields::DESCRIPTION => self.description = value.into_text(field)?,
            fields::CREATION_MODE => {
                let kind = value.into_text(field)?.parse::<ModeKind>()?;
                *self = std::mem::take(self).with_mode(kind);
            }
            fields::SAMPLING_METHOD | fields::SIZE => {
                let CreationMode::Auto {
                    sampling_method,
                    size,
                } = &mut self.mode
                else {
                    return Err(DomainError::validation(format!(
                        "Field '{}' is only available when sampling queries",
                        field
                    )));
                };

                if field == fields::SIZE {
                    *size = value.into_number(field)?;
                } else {
                    *sampling_method = value.into_text(field)?.parse()?;
                }
            }
            _ => return Err(unknown_field("query set", field)),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_samples_randomly() {
        let draft = QuerySetDraft::new();
        assert_eq!(
            draft.mode,
            CreationMode::Auto {
                sampling_method: SamplingMethod::Random,
                size: Some(DEFAULT_QUERY_SET_SIZE),
            }
        );
    }

    #[test]
    fn test_switching_modes_discards_other_fields() {
        let draft = QuerySetDraft::new()
            .with_queries(vec![QueryRecord::new("q1", "a1")])
            .with_mode(ModeKind::Auto);

        assert_eq!(
            draft.mode,
            CreationMode::Auto {
                sampling_method: SamplingMethod::Random,
                size: None,
            }
        );
        assert!(draft.queries().is_empty());

        let draft = draft.with_mode(ModeKind::Manual);
        assert!(draft.queries().is_empty());
    }

    #[test]
    fn test_switching_to_same_mode_is_identity() {
        let draft = QuerySetDraft::new().with_queries(vec![QueryRecord::new("q1", "a1")]);
        let same = draft.clone().with_mode(ModeKind::Manual);
        assert_eq!(draft, same);
    }

    #[test]
    fn test_set_field_updates_auto_fields() {
        let mut draft = QuerySetDraft::new();
        draft.set_field(fields::NAME, "Test Query Set Name".into()).unwrap();
        draft.set_field(fields::SAMPLING_METHOD, "topN".into()).unwrap();
        draft.set_field(fields::SIZE, "25".into()).unwrap();

        assert_eq!(draft.name, "Test Query Set Name");
        assert_eq!(
            draft.mode,
            CreationMode::Auto {
                sampling_method: SamplingMethod::TopN,
                size: Some(25),
            }
        );
    }

    #[test]
    fn test_auto_fields_rejected_in_manual_mode() {
        let mut draft = QuerySetDraft::new().with_mode(ModeKind::Manual);
        assert!(draft.set_field(fields::SIZE, 10.into()).is_err());
    }

    #[test]
    fn test_creation_mode_field_switches_mode() {
        let mut draft = QuerySetDraft::new();
        draft.set_field(fields::CREATION_MODE, "MANUAL".into()).unwrap();
        assert_eq!(draft.mode.kind(), ModeKind::Manual);
    }

    #[test]
    fn test_unknown_field() {
        let mut draft = QuerySetDraft::new();
        let err = draft.set_field("index", "products".into()).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("Unknown field 'index' for query set")
        );
    }

    #[test]
    fn test_deserialize_manual_draft() {
        let json = r#"{
            "name": "Manual Query Set",
            "description": "Manual Query Set Description",
            "creationMode": "MANUAL",
            "queries": [{"queryText": "test query 1", "referenceAnswer": "test answer 1"}]
        }"#;

        let draft: QuerySetDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.queries(), &[QueryRecord::new("test query 1", "test answer 1")]);
    }

    #[test]
    fn test_deserialize_without_mode_is_fresh_sampled_draft() {
        let draft: QuerySetDraft =
            serde_json::from_str(r#"{"name": "", "description": ""}"#).unwrap();
        assert_eq!(draft, QuerySetDraft::new());
    }

    #[test]
    fn test_deserialize_explicit_auto_keeps_missing_size_blank() {
        let draft: QuerySetDraft =
            serde_json::from_str(r#"{"creationMode": "AUTO", "samplingMethod": "topN"}"#).unwrap();
        assert_eq!(
            draft.mode,
            CreationMode::Auto {
                sampling_method: SamplingMethod::TopN,
                size: None,
            }
        );
    }
}
