//! Judgment draft and related types

use serde::{Deserialize, Serialize};

use crate::domain::draft::field::{fields, unknown_field, FieldValue};
use crate::domain::DomainError;

pub const DEFAULT_JUDGMENT_SIZE: i64 = 5;
pub const DEFAULT_TOKEN_LIMIT: i64 = 4000;
pub const DEFAULT_MAX_RANK: i64 = 20;

/// Click model used to derive judgments from user behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickModel {
    /// Clicks over expected clicks
    #[default]
    Coec,
}

impl std::str::FromStr for ClickModel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "coec" => Ok(ClickModel::Coec),
            other => Err(DomainError::validation(format!(
                "Unknown click model '{}'",
                other
            ))),
        }
    }
}

/// Discriminant of [`JudgmentKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JudgmentType {
    #[serde(rename = "LLM_JUDGMENT")]
    Llm,
    #[serde(rename = "UBI_JUDGMENT")]
    Ubi,
}

impl JudgmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JudgmentType::Llm => "LLM_JUDGMENT",
            JudgmentType::Ubi => "UBI_JUDGMENT",
        }
    }
}

impl std::fmt::Display for JudgmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JudgmentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "LLM_JUDGMENT" => Ok(JudgmentType::Llm),
            "UBI_JUDGMENT" => Ok(JudgmentType::Ubi),
            other => Err(DomainError::validation(format!(
                "Unknown judgment type '{}'",
                other
            ))),
        }
    }
}

/// Parameters of a judgment rated by a language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmJudgment {
    #[serde(default)]
    pub model_id: String,
    #[serde(default, rename = "querySetId")]
    pub query_set_ref: Option<String>,
    #[serde(default, rename = "searchConfigurationList")]
    pub search_configuration_refs: Vec<String>,
    /// Number of top results rated per query
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(default = "default_token_limit")]
    pub token_limit: i64,
    #[serde(default)]
    pub context_fields: Vec<String>,
    #[serde(default)]
    pub ignore_failure: bool,
}

impl Default for LlmJudgment {
    fn default() -> Self {
        Self {
            model_id: String::new(),
            query_set_ref: None,
            search_configuration_refs: Vec::new(),
            size: DEFAULT_JUDGMENT_SIZE,
            token_limit: DEFAULT_TOKEN_LIMIT,
            context_fields: Vec::new(),
            ignore_failure: false,
        }
    }
}

/// Parameters of a judgment derived from user behavior insights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UbiJudgment {
    #[serde(default)]
    pub click_model: ClickModel,
    #[serde(default = "default_max_rank")]
    pub max_rank: i64,
}

impl Default for UbiJudgment {
    fn default() -> Self {
        Self {
            click_model: ClickModel::default(),
            max_rank: DEFAULT_MAX_RANK,
        }
    }
}

fn default_size() -> i64 {
    DEFAULT_JUDGMENT_SIZE
}

fn default_token_limit() -> i64 {
    DEFAULT_TOKEN_LIMIT
}

fn default_max_rank() -> i64 {
    DEFAULT_MAX_RANK
}

/// Type-specific part of a judgment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JudgmentKind {
    #[serde(rename = "LLM_JUDGMENT")]
    Llm(LlmJudgment),
    #[serde(rename = "UBI_JUDGMENT")]
    Ubi(UbiJudgment),
}

impl JudgmentKind {
    pub fn judgment_type(&self) -> JudgmentType {
        match self {
            JudgmentKind::Llm(_) => JudgmentType::Llm,
            JudgmentKind::Ubi(_) => JudgmentType::Ubi,
        }
    }

    fn blank(judgment_type: JudgmentType) -> Self {
        match judgment_type {
            JudgmentType::Llm => JudgmentKind::Llm(LlmJudgment::default()),
            JudgmentType::Ubi => JudgmentKind::Ubi(UbiJudgment::default()),
        }
    }
}

impl Default for JudgmentKind {
    fn default() -> Self {
        JudgmentKind::Llm(LlmJudgment::default())
    }
}

/// Judgment being filled in on the creation screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "JudgmentForm")]
pub struct JudgmentDraft {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: JudgmentKind,
}

/// Posted judgment form; a missing `type` means an LLM judgment
#[derive(Debug, Deserialize)]
struct JudgmentForm {
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type")]
    judgment_type: Option<JudgmentType>,
    #[serde(flatten)]
    llm: LlmJudgment,
    #[serde(flatten)]
    ubi: UbiJudgment,
}

impl From<JudgmentForm> for JudgmentDraft {
    fn from(form: JudgmentForm) -> Self {
        let kind = match form.judgment_type.unwrap_or(JudgmentType::Llm) {
            JudgmentType::Llm => JudgmentKind::Llm(form.llm),
            JudgmentType::Ubi => JudgmentKind::Ubi(form.ubi),
        };
        Self {
            name: form.name,
            kind,
        }
    }
}

impl JudgmentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch judgment type, discarding the fields of the previous type.
    ///
    /// Switching to the current type leaves the draft untouched.
    pub fn with_type(mut self, judgment_type: JudgmentType) -> Self {
        if self.kind.judgment_type() != judgment_type {
            self.kind = JudgmentKind::blank(judgment_type);
        }
        self
    }

    /// Apply a single form change
    pub fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), DomainError> {
        if field == fields::NAME {
            self.name = value.into_text(field)?;
            return Ok(());
        }

        if field == fields::TYPE {
            let judgment_type = value.into_text(field)?.parse::<JudgmentType>()?;
            *self = std::mem::take(self).with_type(judgment_type);
            return Ok(());
        }

        match (field, &mut self.kind) {
            (fields::MODEL_ID, JudgmentKind::Llm(llm)) => llm.model_id = value.into_text(field)?,
            (fields::QUERY_SET_ID, JudgmentKind::Llm(llm)) => {
                llm.query_set_ref = value.into_optional_text(field)?
            }
            (fields::SEARCH_CONFIGURATION_LIST, JudgmentKind::Llm(llm)) => {
                llm.search_configuration_refs = value.into_list(field)?
            }
            (fields::SIZE, JudgmentKind::Llm(llm)) => {
                llm.size = value.into_number(field)?.unwrap_or(0)
            }
            (fields::TOKEN_LIMIT, JudgmentKind::Llm(llm)) => {
                llm.token_limit = value.into_number(field)?.unwrap_or(0)
            }
            (fields::CONTEXT_FIELDS, JudgmentKind::Llm(llm)) => {
                llm.context_fields = value.into_list(field)?
            }
            (fields::IGNORE_FAILURE, JudgmentKind::Llm(llm)) => {
                llm.ignore_failure = value.into_flag(field)?
            }
            (fields::CLICK_MODEL, JudgmentKind::Ubi(ubi)) => {
                ubi.click_model = value.into_text(field)?.parse()?
            }
            (fields::MAX_RANK, JudgmentKind::Ubi(ubi)) => {
                ubi.max_rank = value.into_number(field)?.unwrap_or(0)
            }
            (_, kind) => {
                return Err(unknown_field(
                    &format!("{} judgment", kind.judgment_type()),
                    field,
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_is_llm_judgment() {
        let draft = JudgmentDraft::new();
        assert_eq!(draft.kind.judgment_type(), JudgmentType::Llm);
    }

    #[test]
    fn test_switching_type_discards_references() {
        let mut draft = JudgmentDraft::new();
        draft.set_field(fields::QUERY_SET_ID, "qs-1".into()).unwrap();
        draft.set_field(fields::TYPE, "UBI_JUDGMENT".into()).unwrap();
        draft.set_field(fields::TYPE, "LLM_JUDGMENT".into()).unwrap();

        assert_eq!(draft.kind, JudgmentKind::Llm(LlmJudgment::default()));
    }

    #[test]
    fn test_ubi_fields() {
        let mut draft = JudgmentDraft::new().with_type(JudgmentType::Ubi);
        draft.set_field(fields::NAME, "Test UBI Judgment".into()).unwrap();
        draft.set_field(fields::CLICK_MODEL, "coec".into()).unwrap();
        draft.set_field(fields::MAX_RANK, "20".into()).unwrap();

        assert_eq!(
            draft.kind,
            JudgmentKind::Ubi(UbiJudgment {
                click_model: ClickModel::Coec,
                max_rank: 20,
            })
        );
    }

    #[test]
    fn test_llm_fields_rejected_for_ubi() {
        let mut draft = JudgmentDraft::new().with_type(JudgmentType::Ubi);
        let err = draft.set_field(fields::MODEL_ID, "m".into()).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("Unknown field 'modelId' for UBI_JUDGMENT judgment")
        );
    }

    #[test]
    fn test_cleared_max_rank_becomes_zero() {
        let mut draft = JudgmentDraft::new().with_type(JudgmentType::Ubi);
        draft.set_field(fields::MAX_RANK, "".into()).unwrap();
        assert!(matches!(draft.kind, JudgmentKind::Ubi(UbiJudgment { max_rank: 0, .. })));
    }

    #[test]
    fn test_deserialize_llm_draft_with_defaults() {
        let json = r#"{"name": "Test Judgment", "type": "LLM_JUDGMENT", "modelId": "test-model-id"}"#;
        let draft: JudgmentDraft = serde_json::from_str(json).unwrap();

        let JudgmentKind::Llm(llm) = draft.kind else {
            panic!("expected an LLM judgment");
        };
        assert_eq!(llm.model_id, "test-model-id");
        assert_eq!(llm.size, DEFAULT_JUDGMENT_SIZE);
        assert!(llm.search_configuration_refs.is_empty());
    }

    #[test]
    fn test_deserialize_without_type_is_llm_judgment() {
        let draft: JudgmentDraft = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert_eq!(draft, JudgmentDraft::new());
    }

    #[test]
    fn test_deserialize_ubi_judgment_ignores_llm_fields() {
        let json = r#"{"name": "Clicks", "type": "UBI_JUDGMENT", "modelId": "m-1", "maxRank": 7}"#;
        let draft: JudgmentDraft = serde_json::from_str(json).unwrap();
        assert_eq!(
            draft.kind,
            JudgmentKind::Ubi(UbiJudgment {
                click_model: ClickModel::Coec,
                max_rank: 7,
            })
        );
    }
}
