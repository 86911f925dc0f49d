//! Creation session service - Drives one creation screen from open to close
//!
//! The session owns the draft, the displayed validation errors and the
//! submission controller. Handlers mirror the events a hosting screen emits;
//! every state change is published on a watch channel so renderers can follow
//! along.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::query_set::{parse_queries, QueryPreview};
use crate::domain::{
    dispatch, fields, validate, Draft, DraftVariant, DomainError, EntityBackend, EntityKind,
    FieldValue, Navigation, SubmissionController, SubmissionFailure, SubmissionState,
    SubmitResponse, ValidationResult,
};

/// Default number of uploaded queries shown in the preview table
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;

/// Everything a creation screen renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub draft: Draft,
    pub validation_errors: ValidationResult,
    pub submission_state: SubmissionState,
    pub failure: Option<SubmissionFailure>,
    pub preview: Option<QueryPreview>,
}

/// Watch receiver following a session
pub type SessionWatcher = watch::Receiver<SessionSnapshot>;

struct SessionInner {
    draft: Draft,
    errors: ValidationResult,
    controller: SubmissionController,
    preview: Option<QueryPreview>,
}

impl SessionInner {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            draft: self.draft.clone(),
            validation_errors: self.errors.clone(),
            submission_state: self.controller.state().clone(),
            failure: self.controller.last_failure().cloned(),
            preview: self.preview.clone(),
        }
    }

    /// Re-run validation when errors are on screen so none of them are stale
    fn revalidate_if_shown(&mut self) {
        if !self.errors.is_empty() {
            self.errors = validate(&self.draft);
        }
    }

    /// Edits are refused once the creation succeeded or was cancelled
    fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.controller.state().is_terminal() {
            return Err(DomainError::conflict(format!(
                "The {} creation is already finished",
                self.draft.kind().label()
            )));
        }
        Ok(())
    }

    fn drop_preview_without_queries(&mut self) {
        let has_queries = matches!(&self.draft, Draft::QuerySet(draft) if !draft.queries().is_empty());
        if !has_queries {
            self.preview = None;
        }
    }
}

/// Session behind one creation screen
pub struct CreationSession<B: ?Sized> {
    backend: Arc<B>,
    preview_limit: usize,
    inner: Mutex<SessionInner>,
    state_tx: watch::Sender<SessionSnapshot>,
}

impl<B: EntityBackend + ?Sized> CreationSession<B> {
    /// Open a session with a blank draft of the given kind
    pub fn new(backend: Arc<B>, kind: EntityKind) -> Self {
        Self::with_draft(backend, Draft::new(kind))
    }

    /// Open a session on an existing draft
    pub fn with_draft(backend: Arc<B>, draft: Draft) -> Self {
        let inner = SessionInner {
            draft,
            errors: ValidationResult::new(),
            controller: SubmissionController::new(),
            preview: None,
        };
        let (state_tx, _) = watch::channel(inner.snapshot());

        debug!(entity = %inner.draft.kind(), "Creation session opened");

        Self {
            backend,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            inner: Mutex::new(inner),
            state_tx,
        }
    }

    pub fn with_preview_limit(mut self, preview_limit: usize) -> Self {
        self.preview_limit = preview_limit;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionInner>, DomainError> {
        self.inner
            .lock()
            .map_err(|_| DomainError::internal("Failed to acquire session lock"))
    }

    fn publish(&self, inner: &SessionInner) {
        self.state_tx.send_replace(inner.snapshot());
    }

    /// Apply a form change and clear the now stale error of that field
    pub fn on_field_change(&self, field: &str, value: FieldValue) -> Result<(), DomainError> {
        let mut inner = self.lock()?;
        inner.ensure_editable()?;
        inner.draft.set_field(field, value)?;

        if matches!(field, fields::CREATION_MODE | fields::TYPE) {
            inner.drop_preview_without_queries();
            inner.revalidate_if_shown();
        } else {
            inner.errors.clear_field(field);
        }

        self.publish(&inner);
        Ok(())
    }

    /// Switch the draft to another mode or type
    pub fn on_type_change(&self, variant: DraftVariant) -> Result<(), DomainError> {
        let mut inner = self.lock()?;
        inner.ensure_editable()?;
        let draft = std::mem::replace(&mut inner.draft, Draft::new(variant.entity_kind()));
        inner.draft = draft.transition(variant);

        debug!(variant = ?variant, "Draft shape changed");

        inner.drop_preview_without_queries();
        inner.revalidate_if_shown();
        self.publish(&inner);
        Ok(())
    }

    /// Parse an NDJSON upload into the query set's queries.
    ///
    /// On failure every malformed line is recorded under the `queries` field
    /// and the draft keeps its previous queries.
    pub fn on_file_upload(&self, content: &str) -> Result<QueryPreview, DomainError> {
        let mut inner = self.lock()?;
        inner.ensure_editable()?;
        let Draft::QuerySet(query_set) = &inner.draft else {
            return Err(DomainError::validation(format!(
                "Queries can only be uploaded to a query set, not a {}",
                inner.draft.kind()
            )));
        };
        let query_set = query_set.clone();

        match parse_queries(content) {
            Ok(queries) => {
                let preview = QueryPreview::new(&queries, self.preview_limit);
                debug!(queries = queries.len(), "Parsed query upload");

                inner.draft = Draft::QuerySet(query_set.with_queries(queries));
                inner.errors.clear_field(fields::QUERIES);
                inner.preview = Some(preview.clone());
                self.publish(&inner);
                Ok(preview)
            }
            Err(error) => {
                debug!(malformed_lines = error.errors.len(), "Rejected query upload");

                inner.errors.clear_field(fields::QUERIES);
                for line in &error.errors {
                    inner.errors.add(fields::QUERIES, line.to_string());
                }
                self.publish(&inner);
                Err(DomainError::parse(error.to_string()))
            }
        }
    }

    /// Validate and, if valid, send exactly one creation request
    pub async fn on_submit(&self) -> Result<SubmitResponse, DomainError> {
        let (ticket, draft) = {
            let mut inner = self.lock()?;
            let draft = inner.draft.clone();
            let begun = inner.controller.begin(&draft);

            match begun {
                Ok(ticket) => {
                    inner.errors = ValidationResult::new();
                    self.publish(&inner);
                    (ticket, draft)
                }
                Err(response) => {
                    if let SubmitResponse::Invalid { errors } = &response {
                        inner.errors = errors.clone();
                    }
                    self.publish(&inner);
                    return Ok(response);
                }
            }
        };

        let outcome = dispatch(self.backend.as_ref(), &draft).await;

        let mut inner = self.lock()?;
        let response = inner.controller.complete(ticket, outcome);
        self.publish(&inner);
        Ok(response)
    }

    /// Abandon the draft and go back to the entity's list view
    pub fn on_cancel(&self) -> Result<Navigation, DomainError> {
        let mut inner = self.lock()?;
        inner.controller.cancel();
        let kind = inner.draft.kind();
        inner.draft = Draft::new(kind);
        inner.errors = ValidationResult::new();
        inner.preview = None;

        info!(entity = %kind, "Creation cancelled");

        self.publish(&inner);
        Ok(Navigation::list(kind))
    }

    pub fn validation_errors(&self) -> Result<ValidationResult, DomainError> {
        Ok(self.lock()?.errors.clone())
    }

    pub fn submission_state(&self) -> Result<SubmissionState, DomainError> {
        Ok(self.lock()?.controller.state().clone())
    }

    pub fn draft(&self) -> Result<Draft, DomainError> {
        Ok(self.lock()?.draft.clone())
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, DomainError> {
        Ok(self.lock()?.snapshot())
    }

    /// Follow every change of the session
    pub fn subscribe(&self) -> SessionWatcher {
        self.state_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query_set::ModeKind;
    use crate::domain::submission::MockEntityBackend;
    use crate::domain::{EntityId, FailureReason, JudgmentType, SubmissionOutcome};

    fn open_session(backend: MockEntityBackend, kind: EntityKind) -> CreationSession<MockEntityBackend> {
        CreationSession::new(Arc::new(backend), kind)
    }

    #[tokio::test]
    async fn test_empty_query_set_shows_name_and_description() {
        let session = open_session(MockEntityBackend::new(), EntityKind::QuerySet);

        let response = session.on_submit().await.unwrap();
        assert!(matches!(response, SubmitResponse::Invalid { .. }));

        let errors = session.validation_errors().unwrap();
        let messages: Vec<_> = errors.messages().collect();
        assert_eq!(
            messages,
            vec![
                "Description is a required parameter.",
                "Name is a required parameter.",
            ]
        );
    }

    #[tokio::test]
    async fn test_forbidden_backend_keeps_session_editable() {
        let mut backend = MockEntityBackend::new();
        backend
            .expect_create_query_set()
            .times(1)
            .returning(|_| Err(DomainError::forbidden("Forbidden")));
        let session = open_session(backend, EntityKind::QuerySet);

        session.on_field_change(fields::NAME, "Sampled".into()).unwrap();
        session
            .on_field_change(fields::DESCRIPTION, "Top 20 queries".into())
            .unwrap();
        session.on_field_change(fields::SIZE, FieldValue::Number(20)).unwrap();

        let response = session.on_submit().await.unwrap();
        let SubmitResponse::Completed {
            outcome: SubmissionOutcome::Failure(failure),
        } = response
        else {
            panic!("expected a failed submission");
        };
        assert_eq!(failure.reason, FailureReason::Forbidden);
        assert_eq!(failure.title, "Failed to create query set");
        assert_eq!(failure.detail, "Forbidden");

        let snapshot = session.snapshot().unwrap();
        assert_eq!(snapshot.submission_state, SubmissionState::Idle);
        assert_eq!(snapshot.failure, Some(failure));
        session.on_field_change(fields::NAME, "Renamed".into()).unwrap();
    }

    #[test]
    fn test_upload_populates_queries_and_preview() {
        let session = open_session(MockEntityBackend::new(), EntityKind::QuerySet);
        session
            .on_type_change(DraftVariant::QuerySet(ModeKind::Manual))
            .unwrap();

        let content = concat!(
            r#"{"queryText": "red shoes", "referenceAnswer": "running shoes in red"}"#,
            "\n",
            r#"{"queryText": "laptop bag", "referenceAnswer": ""}"#,
            "\n",
        );
        let preview = session.on_file_upload(content).unwrap();

        assert_eq!(preview.total, 2);
        assert_eq!(preview.records.len(), 2);
        assert_eq!(preview.records[0].query_text, "red shoes");

        let Draft::QuerySet(draft) = session.draft().unwrap() else {
            panic!("expected a query set draft");
        };
        assert_eq!(draft.queries().len(), 2);
        assert_eq!(session.snapshot().unwrap().preview, Some(preview));
    }

    #[test]
    fn test_malformed_upload_reports_lines() {
        let session = open_session(MockEntityBackend::new(), EntityKind::QuerySet);

        let content = "{\"queryText\": \"ok\", \"referenceAnswer\": \"\"}\nnot json\n[]\n";
        let error = session.on_file_upload(content).unwrap_err();
        assert!(matches!(error, DomainError::Parse { .. }));

        let errors = session.validation_errors().unwrap();
        let lines = errors.field_errors(fields::QUERIES);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Line 2:"));
        assert!(lines[1].starts_with("Line 3:"));
    }

    #[tokio::test]
    async fn test_llm_judgment_with_model_only() {
        let session = open_session(MockEntityBackend::new(), EntityKind::Judgment);
        session.on_field_change(fields::NAME, "Ratings".into()).unwrap();
        session.on_field_change(fields::MODEL_ID, "model-1".into()).unwrap();

        session.on_submit().await.unwrap();

        let errors = session.validation_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.field_errors(fields::QUERY_SET_ID),
            &["Please select a query set."]
        );
        assert_eq!(
            errors.field_errors(fields::SEARCH_CONFIGURATION_LIST),
            &["Please select at least one search configuration."]
        );
    }

    #[tokio::test]
    async fn test_type_change_revalidates_shown_errors() {
        let session = open_session(MockEntityBackend::new(), EntityKind::Judgment);
        session.on_submit().await.unwrap();
        assert!(session.validation_errors().unwrap().has_field(fields::MODEL_ID));

        session
            .on_type_change(DraftVariant::Judgment(JudgmentType::Ubi))
            .unwrap();

        let errors = session.validation_errors().unwrap();
        assert!(!errors.has_field(fields::MODEL_ID));
        assert_eq!(errors.field_errors(fields::NAME), &["Name is a required parameter."]);
    }

    #[tokio::test]
    async fn test_field_change_clears_its_error() {
        let session = open_session(MockEntityBackend::new(), EntityKind::QuerySet);
        session.on_submit().await.unwrap();

        session.on_field_change(fields::NAME, "Named".into()).unwrap();

        let errors = session.validation_errors().unwrap();
        assert!(!errors.has_field(fields::NAME));
        assert!(errors.has_field(fields::DESCRIPTION));
    }

    #[test]
    fn test_cancel_navigates_without_backend_calls() {
        let session = open_session(MockEntityBackend::new(), EntityKind::SearchConfiguration);
        session
            .on_field_change(fields::QUERY, "{not json".into())
            .unwrap();

        let navigation = session.on_cancel().unwrap();

        assert_eq!(navigation.route, "/searchConfiguration");
        assert_eq!(session.submission_state().unwrap(), SubmissionState::Cancelled);
        assert!(session.validation_errors().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_success() {
        let mut backend = MockEntityBackend::new();
        backend
            .expect_create_search_configuration()
            .times(1)
            .returning(|_| Ok(EntityId::new("sc-1")));
        let session = open_session(backend, EntityKind::SearchConfiguration);
        let watcher = session.subscribe();

        session.on_field_change(fields::NAME, "BM25".into()).unwrap();
        session
            .on_field_change(fields::QUERY, r#"{"query": {"match_all": {}}}"#.into())
            .unwrap();
        session.on_field_change(fields::INDEX, "products".into()).unwrap();
        session.on_submit().await.unwrap();

        assert_eq!(
            watcher.borrow().submission_state,
            SubmissionState::Succeeded {
                entity_id: EntityId::new("sc-1")
            }
        );
    }

    #[test]
    fn test_cancel_discards_draft_and_refuses_edits() {
        let session = open_session(MockEntityBackend::new(), EntityKind::QuerySet);
        session
            .on_file_upload(r#"{"queryText": "q", "referenceAnswer": "a"}"#)
            .unwrap();

        session.on_cancel().unwrap();

        let snapshot = session.snapshot().unwrap();
        assert_eq!(snapshot.draft, Draft::new(EntityKind::QuerySet));
        assert!(snapshot.preview.is_none());

        let error = session
            .on_field_change(fields::NAME, "Late".into())
            .unwrap_err();
        assert!(matches!(error, DomainError::Conflict { .. }));
        assert!(session
            .on_type_change(DraftVariant::QuerySet(ModeKind::Manual))
            .is_err());
        assert_eq!(session.draft().unwrap(), Draft::new(EntityKind::QuerySet));
    }

    #[tokio::test]
    async fn test_upload_after_success_is_refused() {
        let mut backend = MockEntityBackend::new();
        backend
            .expect_create_query_set()
            .times(1)
            .returning(|_| Ok(EntityId::new("qs-1")));
        let session = open_session(backend, EntityKind::QuerySet);
        session.on_field_change(fields::NAME, "Sampled".into()).unwrap();
        session
            .on_field_change(fields::DESCRIPTION, "Top queries".into())
            .unwrap();
        session.on_submit().await.unwrap();
        let watcher = session.subscribe();

        let error = session
            .on_file_upload(r#"{"queryText": "q", "referenceAnswer": "a"}"#)
            .unwrap_err();

        assert!(matches!(error, DomainError::Conflict { .. }));
        assert!(!watcher.has_changed().unwrap());
        assert!(session.snapshot().unwrap().preview.is_none());
    }
}
