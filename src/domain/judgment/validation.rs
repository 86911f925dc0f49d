//! Judgment validation

use thiserror::Error;

use super::{JudgmentDraft, JudgmentKind, LlmJudgment, UbiJudgment};
use crate::domain::draft::field::fields;
use crate::domain::validation::{FieldError, ValidationResult};

/// Validation errors for judgments
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JudgmentValidationError {
    #[error("Name is a required parameter.")]
    NameRequired,

    #[error("Please select a model.")]
    ModelRequired,

    #[error("Please select a query set.")]
    QuerySetRequired,

    #[error("Please select at least one search configuration.")]
    SearchConfigurationRequired,

    #[error("Size must be a positive integer.")]
    SizeNotPositive,

    #[error("Token limit must be a positive integer.")]
    TokenLimitNotPositive,

    #[error("Max rank must be a positive integer.")]
    MaxRankNotPositive,
}

impl FieldError for JudgmentValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => fields::NAME,
            Self::ModelRequired => fields::MODEL_ID,
            Self::QuerySetRequired => fields::QUERY_SET_ID,
            Self::SearchConfigurationRequired => fields::SEARCH_CONFIGURATION_LIST,
            Self::SizeNotPositive => fields::SIZE,
            Self::TokenLimitNotPositive => fields::TOKEN_LIMIT,
            Self::MaxRankNotPositive => fields::MAX_RANK,
        }
    }
}

/// Validate a judgment draft, collecting every violation.
///
/// Only LLM judgments reference other entities; UBI judgments are computed from
/// recorded user behavior and need no query set or search configuration.
pub fn validate_judgment(draft: &JudgmentDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    if draft.name.trim().is_empty() {
        result.push(JudgmentValidationError::NameRequired);
    }

    match &draft.kind {
        JudgmentKind::Llm(llm) => validate_llm_judgment(llm, &mut result),
        JudgmentKind::Ubi(ubi) => validate_ubi_judgment(ubi, &mut result),
    }

    result
}

fn validate_llm_judgment(llm: &LlmJudgment, result: &mut ValidationResult) {
    if llm.model_id.trim().is_empty() {
        result.push(JudgmentValidationError::ModelRequired);
    }

    if llm.query_set_ref.as_deref().is_none_or(|id| id.trim().is_empty()) {
        result.push(JudgmentValidationError::QuerySetRequired);
    }

    if llm.search_configuration_refs.is_empty() {
        result.push(JudgmentValidationError::SearchConfigurationRequired);
    }

    if llm.size < 1 {
        result.push(JudgmentValidationError::SizeNotPositive);
    }

    if llm.token_limit < 1 {
        result.push(JudgmentValidationError::TokenLimitNotPositive);
    }
}

fn validate_ubi_judgment(ubi: &UbiJudgment, result: &mut ValidationResult) {
    if ubi.max_rank < 1 {
        result.push(JudgmentValidationError::MaxRankNotPositive);
    }
}
