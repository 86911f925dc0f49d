//! Domain layer - Drafts, validation rules and the submission lifecycle

pub mod draft;
pub mod error;
pub mod experiment;
pub mod judgment;
pub mod query_set;
pub mod search_configuration;
pub mod submission;
pub mod validation;

pub use draft::{fields, validate, Draft, DraftVariant, EntityKind, FieldValue, Navigation};
pub use error::DomainError;
pub use experiment::{
    find_template, select_template, templates, ExperimentDraft, ExperimentKind,
    ExperimentTemplate, ExperimentType, TemplateId,
};
pub use judgment::{JudgmentDraft, JudgmentKind, JudgmentType};
pub use query_set::{
    parse_queries, BulkParseError, CreationMode, ModeKind, QueryPreview, QueryRecord,
    QuerySetDraft, SamplingMethod,
};
pub use search_configuration::SearchConfigurationDraft;
pub use submission::{
    dispatch, EntityBackend, EntityId, FailureReason, IgnoredReason, IndexCatalog, IndexInfo,
    SubmissionController, SubmissionFailure, SubmissionOutcome, SubmissionState,
    SubmissionTicket, SubmitResponse,
};
pub use validation::{FieldError, ValidationResult};
