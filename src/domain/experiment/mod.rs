//! Experiment domain module
//!
//! Drafts for the persisted experiment types (query set comparison, search
//! evaluation, hybrid optimizer) and the template registry the landing page
//! renders as cards.

mod entity;
mod template;
mod validation;

// Re-export all public types
pub use entity::{
    EvaluationTargets, ExperimentDraft, ExperimentKind, ExperimentType, DEFAULT_EXPERIMENT_SIZE,
};
pub use template::{find_template, select_template, templates, ExperimentTemplate, TemplateId};
pub use validation::{validate_experiment, ExperimentValidationError};
