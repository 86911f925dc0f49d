//! Submission state machine
//!
//! `begin` validates the draft and hands out a ticket for exactly one backend
//! request, `complete` applies the backend's answer if the ticket is still
//! current, and `cancel` invalidates every outstanding ticket. The controller
//! itself never performs I/O; `dispatch` is the single place a backend is
//! called.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::backend::EntityBackend;
use super::outcome::{EntityId, SubmissionFailure, SubmissionOutcome};
use crate::domain::draft::{validate, Draft, EntityKind};
use crate::domain::validation::ValidationResult;

/// Where a creation screen is in its lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SubmissionState {
    /// Editable. A previous failure, if any, is kept by the controller.
    #[default]
    Idle,
    Validating,
    Submitting { generation: u64 },
    #[serde(rename_all = "camelCase")]
    Succeeded { entity_id: EntityId },
    Cancelled,
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded { .. } | SubmissionState::Cancelled
        )
    }
}

/// Why a submit or a late backend answer had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IgnoredReason {
    /// Another submission is still waiting for the backend
    InFlight,
    /// The session already succeeded or was cancelled
    Finished,
    /// The answer belongs to a submission that was cancelled
    Discarded,
}

/// What a submit attempt amounted to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum SubmitResponse {
    /// Validation failed; nothing was sent
    Invalid { errors: ValidationResult },
    Completed { outcome: SubmissionOutcome },
    Ignored { reason: IgnoredReason },
}

/// Permission to send one creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
    kind: EntityKind,
}

impl SubmissionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }
}

/// Single-draft submission state machine
#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    generation: u64,
    last_failure: Option<SubmissionFailure>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Failure of the most recent submission, cleared by the next attempt
    pub fn last_failure(&self) -> Option<&SubmissionFailure> {
        self.last_failure.as_ref()
    }

    /// Validate the draft and, if it passes, issue a ticket for one request.
    ///
    /// Returns the response to report instead when nothing may be sent.
    pub fn begin(&mut self, draft: &Draft) -> Result<SubmissionTicket, SubmitResponse> {
        match &self.state {
            SubmissionState::Submitting { generation } => {
                debug!(generation, "Submission already in flight, ignoring submit");
                return Err(SubmitResponse::Ignored {
                    reason: IgnoredReason::InFlight,
                });
            }
            state if state.is_terminal() => {
                return Err(SubmitResponse::Ignored {
                    reason: IgnoredReason::Finished,
                });
            }
            _ => {}
        }

        self.state = SubmissionState::Validating;
        let errors = validate(draft);
        if !errors.is_valid() {
            debug!(entity = %draft.kind(), errors = errors.len(), "Draft failed validation");
            self.state = SubmissionState::Idle;
            return Err(SubmitResponse::Invalid { errors });
        }

        self.generation += 1;
        self.last_failure = None;
        self.state = SubmissionState::Submitting {
            generation: self.generation,
        };

        debug!(entity = %draft.kind(), generation = self.generation, "Submission started");

        Ok(SubmissionTicket {
            generation: self.generation,
            kind: draft.kind(),
        })
    }

    /// Apply the backend's answer for a ticket
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        outcome: SubmissionOutcome,
    ) -> SubmitResponse {
        let current = matches!(
            self.state,
            SubmissionState::Submitting { generation } if generation == ticket.generation
        );
        if !current {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale submission result"
            );
            return SubmitResponse::Ignored {
                reason: IgnoredReason::Discarded,
            };
        }

        match &outcome {
            SubmissionOutcome::Success { entity_id } => {
                info!(entity = %ticket.kind, entity_id = %entity_id, "Entity created");
                self.state = SubmissionState::Succeeded {
                    entity_id: entity_id.clone(),
                };
            }
            SubmissionOutcome::Failure(failure) => {
                warn!(
                    entity = %ticket.kind,
                    reason = ?failure.reason,
                    detail = %failure.detail,
                    "Entity creation failed"
                );
                self.last_failure = Some(failure.clone());
                self.state = SubmissionState::Idle;
            }
        }

        SubmitResponse::Completed { outcome }
    }

    /// Abandon the draft. Any in-flight result will be discarded.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.state = SubmissionState::Cancelled;
    }
}

/// Send exactly one creation request for the draft's kind
pub async fn dispatch<B>(backend: &B, draft: &Draft) -> SubmissionOutcome
where
    B: EntityBackend + ?Sized,
{
    let kind = draft.kind();
    let result = match draft {
        Draft::QuerySet(draft) => backend.create_query_set(draft).await,
        Draft::SearchConfiguration(draft) => backend.create_search_configuration(draft).await,
        Draft::Judgment(draft) => backend.create_judgment(draft).await,
        Draft::Experiment(draft) => backend.create_experiment(draft).await,
    };

    SubmissionOutcome::from_result(kind, result)
}
