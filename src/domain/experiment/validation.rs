//! Experiment validation utilities

use thiserror::Error;

use super::entity::{ExperimentDraft, ExperimentType};
use crate::domain::draft::field::fields;
use crate::domain::validation::{FieldError, ValidationResult};

/// Validation errors for experiments
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExperimentValidationError {
    #[error("Please select a query set.")]
    QuerySetRequired,

    #[error("Please select exactly two search configurations.")]
    TwoSearchConfigurationsRequired,

    #[error("Please select a search configuration.")]
    SearchConfigurationRequired,

    #[error("Please select at least one judgment.")]
    JudgmentRequired,

    #[error("Size must be a positive integer.")]
    SizeNotPositive,
}

impl FieldError for ExperimentValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::QuerySetRequired => fields::QUERY_SET_ID,
            Self::TwoSearchConfigurationsRequired | Self::SearchConfigurationRequired => {
                fields::SEARCH_CONFIGURATION_LIST
            }
            Self::JudgmentRequired => fields::JUDGMENT_LIST,
            Self::SizeNotPositive => fields::SIZE,
        }
    }
}

/// Validate an experiment draft, collecting every violation
pub fn validate_experiment(draft: &ExperimentDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    if draft.query_set_ref.as_deref().is_none_or(|id| id.trim().is_empty()) {
        result.push(ExperimentValidationError::QuerySetRequired);
    }

    let experiment_type = draft.experiment_type();
    let selected = draft.kind.search_configuration_refs().len();

    if selected != experiment_type.required_search_configurations() {
        result.push(match experiment_type {
            ExperimentType::PairwiseComparison => {
                ExperimentValidationError::TwoSearchConfigurationsRequired
            }
            ExperimentType::PointwiseEvaluation | ExperimentType::HybridOptimizer => {
                ExperimentValidationError::SearchConfigurationRequired
            }
        });
    }

    if draft.kind.judgment_refs().is_some_and(<[String]>::is_empty) {
        result.push(ExperimentValidationError::JudgmentRequired);
    }

    if draft.size < 1 {
        result.push(ExperimentValidationError::SizeNotPositive);
    }

    result
}
