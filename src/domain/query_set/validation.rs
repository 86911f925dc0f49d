//! Query set validation

use thiserror::Error;

use super::{CreationMode, QuerySetDraft};
use crate::domain::draft::field::fields;
use crate::domain::validation::{FieldError, ValidationResult};

/// Validation errors for query sets
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuerySetValidationError {
    #[error("Name is a required parameter.")]
    NameRequired,

    #[error("Description is a required parameter.")]
    DescriptionRequired,

    #[error("Query set size is required.")]
    SizeRequired,

    #[error("Query set size must be a positive integer.")]
    SizeNotPositive,

    #[error("Please upload at least one query.")]
    QueriesRequired,
}

impl FieldError for QuerySetValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => fields::NAME,
            Self::DescriptionRequired => fields::DESCRIPTION,
            Self::SizeRequired | Self::SizeNotPositive => fields::SIZE,
            Self::QueriesRequired => fields::QUERIES,
        }
    }
}

/// Validate a query set draft, collecting every violation
pub fn validate_query_set(draft: &QuerySetDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    if draft.name.trim().is_empty() {
        result.push(QuerySetValidationError::NameRequired);
    }

    if draft.description.trim().is_empty() {
        result.push(QuerySetValidationError::DescriptionRequired);
    }

    match &draft.mode {
        CreationMode::Auto { size: None, .. } => {
            result.push(QuerySetValidationError::SizeRequired);
        }
        CreationMode::Auto {
            size: Some(size), ..
        } if *size < 1 => {
            result.push(QuerySetValidationError::SizeNotPositive);
        }
        CreationMode::Auto { .. } => {}
        CreationMode::Manual { queries } if queries.is_empty() => {
            result.push(QuerySetValidationError::QueriesRequired);
        }
        CreationMode::Manual { .. } => {}
    }

    result
}
