//! Submission outcomes as shown to the user

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::draft::EntityKind;
use crate::domain::error::DomainError;

const GENERIC_FAILURE_DETAIL: &str = "An unexpected error occurred. Please try again.";

/// Identifier returned by the backend for a created entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a submission failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureReason {
    /// The backend's authorization layer denied the write
    Forbidden,
    /// The backend refused the payload
    ValidationRejected,
    NetworkError,
}

/// Failure notification: a title naming the entity and a detail line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFailure {
    pub reason: FailureReason,
    pub title: String,
    pub detail: String,
}

impl SubmissionFailure {
    /// Map a backend error. Forbidden and rejection messages are kept verbatim.
    pub fn from_error(kind: EntityKind, error: &DomainError) -> Self {
        let (reason, detail) = match error {
            DomainError::Forbidden { message } => (FailureReason::Forbidden, message.clone()),
            DomainError::Validation { message } => {
                (FailureReason::ValidationRejected, message.clone())
            }
            _ => (FailureReason::NetworkError, GENERIC_FAILURE_DETAIL.to_string()),
        };

        Self {
            reason,
            title: format!("Failed to create {}", kind.label()),
            detail,
        }
    }
}

impl fmt::Display for SubmissionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.detail)
    }
}

/// Result of one creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SubmissionOutcome {
    #[serde(rename_all = "camelCase")]
    Success { entity_id: EntityId },
    Failure(SubmissionFailure),
}

impl SubmissionOutcome {
    pub fn from_result(kind: EntityKind, result: Result<EntityId, DomainError>) -> Self {
        match result {
            Ok(entity_id) => SubmissionOutcome::Success { entity_id },
            Err(error) => SubmissionOutcome::Failure(SubmissionFailure::from_error(kind, &error)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }

    pub fn failure(&self) -> Option<&SubmissionFailure> {
        match self {
            SubmissionOutcome::Failure(failure) => Some(failure),
            SubmissionOutcome::Success { .. } => None,
        }
    }
}
